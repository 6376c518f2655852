/// Registers a block of code as a new coroutine on the given scheduler and returns its id.
///
/// The block is wrapped in a `move` closure; the identifier before `=>` names the
/// [`Handle`](crate::Handle) inside it.
///
/// # Example
///
/// ```
/// use costack::{spawn, Scheduler, Status};
///
/// let scheduler = Scheduler::new();
/// let name = "greeter".to_string();
/// let id = spawn!(scheduler, co => {
///     println!("Hello from {}", name);
///     co.yield_now();
///     println!("Bye from {}", name);
/// });
///
/// scheduler.resume(id);
/// scheduler.resume(id);
/// assert_eq!(scheduler.status(id), Status::Dead);
/// ```
#[macro_export]
macro_rules! spawn {
    ($scheduler:expr, $handle:ident => $code:block) => {
        $scheduler.spawn(move |$handle: &$crate::Handle| $code)
    };
    ($scheduler:expr, $code:block) => {
        $scheduler.spawn(move |_: &$crate::Handle| $code)
    };
}
