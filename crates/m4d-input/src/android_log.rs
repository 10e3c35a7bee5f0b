#[cfg(target_os = "android")]
pub fn install_android_logger() {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::ffi::CString;
    use std::os::raw::{c_char, c_int};

    const TAG: &str = "MAME4droid";

    unsafe extern "C" {
        fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
    }

    struct AndroidLogger;

    impl Log for AndroidLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Debug
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            // Android priorities: VERBOSE=2, DEBUG=3, INFO=4, WARN=5, ERROR=6.
            let prio = match record.level() {
                Level::Trace => 2,
                Level::Debug => 3,
                Level::Info => 4,
                Level::Warn => 5,
                Level::Error => 6,
            };

            let mut message = format!("[{}] {}", record.target(), record.args());
            if message.contains('\0') {
                message = message.replace('\0', "?");
            }

            let Ok(tag) = CString::new(TAG) else {
                return;
            };
            let Ok(message) = CString::new(message) else {
                return;
            };

            unsafe {
                let _ = __android_log_write(prio, tag.as_ptr(), message.as_ptr());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: AndroidLogger = AndroidLogger;
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(target_os = "android"))]
pub fn install_android_logger() {}
