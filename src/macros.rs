/// Compile a literal pattern once and hand out a `&'static Regex`.
///
/// Only used for the fixed pattern families in `src/rules/`; every literal is
/// exercised by the unit tests, so a bad pattern fails the first test run.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
