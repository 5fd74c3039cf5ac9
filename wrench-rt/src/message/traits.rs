// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
// (none for this module)

// Layer 3: Internal module imports
// (none)

/// Core message trait with compile-time type identification.
///
/// Messages carry a `payload_bytes()` size used purely to model
/// transmission time through the kernel adapter's link simulation — it is
/// orthogonal to the semantic payload of the message (the glossary's
/// "payload map" entries default to this value when a service's payload
/// map omits the message kind).
///
/// # Example
/// ```rust
/// use wrench_rt::message::Message;
///
/// #[derive(Debug, Clone)]
/// struct Ping;
///
/// impl Message for Ping {
///     const MESSAGE_KIND: &'static str = "ping";
/// }
///
/// assert_eq!(Ping.payload_bytes(), 0);
/// ```
pub trait Message: Send + Sync + Clone + Debug + 'static {
    /// Unique message-kind identifier, used to key the payload map and for
    /// diagnostics (compile-time constant, no runtime reflection).
    const MESSAGE_KIND: &'static str;

    /// Size in bytes used to model this message's transmission time. Zero
    /// by default; services that care about control-message transmission
    /// cost override this, or rely on a payload-map entry keyed by
    /// `MESSAGE_KIND` supplied separately (see `default-control-message-size`
    /// in the kernel configuration).
    fn payload_bytes(&self) -> u64 {
        0
    }
}
