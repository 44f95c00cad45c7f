pub use agency_utils_derive::trace_instrument;

mod macros;

/// Version of the agency backend, as reported by the cli.
pub const fn agency_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
