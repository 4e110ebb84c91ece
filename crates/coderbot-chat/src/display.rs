use coderbot_types::Role;

/// Rendering layer the chat core pushes to.
///
/// Calls arrive in order for one request; `push_incremental` always carries
/// the whole buffer so far (with a trailing [`crate::CURSOR`]), not a delta.
pub trait DisplaySurface: Send {
    /// Render a completed turn
    fn push(&mut self, role: Role, text: &str);

    /// Replace the message that is currently streaming
    fn push_incremental(&mut self, partial: &str);

    fn push_warning(&mut self, text: &str);

    /// Show a failure together with what the user can do about it
    fn push_error(&mut self, text: &str, hint: &str);
}
