use thiserror::Error;

/// Fatal lowering failures.
///
/// Input trees are assumed to have passed syntactic validation upstream, so
/// none of these is recoverable: each aborts the compilation unit. A unit
/// dies either on a tree shape a pass cannot express, or on a pass author
/// asking the runtime registry for something it never learned about.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The loop-variable position of a `for-in` statement is neither a
    /// single-name declaration list nor a plain identifier reference.
    #[error("unsupported for-in loop target: {found}")]
    UnsupportedForInTarget { found: String },

    /// A pass requested a helper that is neither registered nor present in
    /// the shared helper pool.
    #[error("runtime helper `{name}` is not registered and has no shared definition")]
    UnknownHelper { name: String },

    /// A helper definition failed to parse. Helper text is authored inside
    /// the compiler, so this is an internal bug, not user input.
    #[error("runtime helper `{name}` failed to parse: {message}")]
    HelperParse { name: String, message: String },
}
