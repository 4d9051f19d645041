use failure::Error;
use itertools::Itertools;
use schafrunde_util::if_dbg_else;
use std::path::Path;

pub use log::{trace, debug, info, warn, error};

/// Installs the global logger: stderr always, plus `opath_log` if given.
/// Must be called at most once per process.
pub fn init_logging(opath_log: Option<&Path>) -> Result<(), Error> {
    let mut dispatch = fern::Dispatch::new()
        .format(|formatcallback, fmtarguments_msg, logrecord| {
            formatcallback.finish(format_args!(
                "[{} {}({:?}) {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                logrecord.target(),
                std::thread::current().id(),
                logrecord.level(),
                fmtarguments_msg,
            ))
        })
        .level(if_dbg_else!({log::LevelFilter::Trace}{log::LevelFilter::Info}))
        .chain(std::io::stderr());
    if let Some(path_log) = opath_log {
        dispatch = dispatch.chain(fern::log_file(path_log)?);
    }
    dispatch.apply()?;
    let fn_panic_handler_original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panicinfo| {
        error!("panic: {}", panicinfo);
        fn_panic_handler_original(panicinfo)
    }));
    info!("Started: {}", std::env::args()
        .format_with(
            /*sep*/" ",
            |str_arg, formatter| {
                formatter(&format_args!("\"{}\"", str_arg))
            },
        )
    );
    Ok(())
}
