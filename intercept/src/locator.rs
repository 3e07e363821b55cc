use log::debug;

use crate::runtime::HostRuntime;

/// Resolve `class` in `loader`, treating absence as a normal outcome.
pub fn locate<H: HostRuntime + ?Sized>(
    runtime: &H,
    class: &str,
    loader: &H::Loader,
) -> Option<H::Class> {
    let found = runtime.find_class(class, loader);
    if found.is_none() {
        debug!("{} class not found", class);
    }
    found
}
