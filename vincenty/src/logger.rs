use log::LevelFilter;

/// map the number of `-v` flags onto a level filter
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u8) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(level_filter(verbosity))
        .try_init()?;

    Ok(())
}
