use log::{warn, LevelFilter};

const DEBUG_PARAMS: &'static [(&'static str, LevelFilter)] = &[
    ("simplelayout::server", LevelFilter::Info),
    // one line per reconciled container per pass, too much for a default run
    ("simplelayout::client::v_simple_layout", LevelFilter::Info),
    ("simplelayout::client::sizing", LevelFilter::Warn),
    ("simplelayout::client::session", LevelFilter::Info),
    ("simplelayout::demo", LevelFilter::Debug),
];

pub fn logger_setup(level_filter: LevelFilter) {
    let mut logger_builder = env_logger::builder();
    logger_builder.filter_level(level_filter);

    // explicit level lower than the table wins, so "-l error" really is quiet
    for (module, level) in DEBUG_PARAMS {
        logger_builder.filter(Some(*module), (*level).min(level_filter));
    }

    match logger_builder.try_init() {
        Ok(_) => {}
        Err(e) => {
            warn!("failed initializing log: {:?}", e);
        }
    }
}
