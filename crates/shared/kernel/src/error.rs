use std::borrow::Cow;

/// Renders an optional error context as a ` (context)` suffix for `Display` impls.
#[must_use]
#[allow(clippy::ref_option)]
pub fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
