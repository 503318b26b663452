// TERM LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_terms")]
macro_rules! term_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_terms"))]
macro_rules! term_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// SCOPE LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_scope")]
macro_rules! scope_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_scope"))]
macro_rules! scope_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// Extra timer logging
#[macro_export]
#[cfg(feature = "detailed_timers")]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        saying::say!($msg, Green #$time.elapsed());
    };
}

#[macro_export]
#[cfg(not(feature = "detailed_timers"))]
macro_rules! timer_log {
    ($time:expr, $msg:expr) => {
        // Nothing
    };
}

// RENDERED OUTPUT LOGGING
#[macro_export]
#[cfg(feature = "show_output")]
macro_rules! output_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_output"))]
macro_rules! output_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}
