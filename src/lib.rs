pub mod api;
pub mod core;

/// 初始化日志，只在 Android 上生效，重复调用无副作用
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("isl_lib_rust"),
        );
    }
}
