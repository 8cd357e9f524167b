/// Runs a backend call from an async UI task. The desktop backend answers
/// synchronously, so this is a plain call.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T,
{
    f()
}
