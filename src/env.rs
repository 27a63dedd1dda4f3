use std::sync::OnceLock;

/// Settings taken from environment variables, read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Env {
    /// `LS8_TRACE`
    trace: bool,
    /// `LS8_MINIMAL`
    minimal: bool,
}

/// Must only be set within `init`
static ENV: OnceLock<Env> = OnceLock::new();

pub fn init() {
    let value = Env {
        trace: is_set(std::env::var("LS8_TRACE").ok().as_deref()),
        minimal: is_set(std::env::var("LS8_MINIMAL").ok().as_deref()),
    };
    assert!(
        ENV.set(value).is_ok(),
        "tried to initialize environment state multiple times"
    );
}

/// Trace every instruction, like `--trace`.
pub fn trace() -> bool {
    get().trace
}

/// Plain output, like `--minimal`.
pub fn minimal() -> bool {
    get().minimal
}

fn get() -> &'static Env {
    ENV.get().unwrap_or_else(|| {
        panic!("tried to access environment state before initialization");
    })
}

fn is_set(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "yes"))
}
