use std::any::Any;

/// Asserts that a block panics. When a message fragment is provided, the panic payload must also
/// contain it.
macro_rules! assert_panics {
    ($run:block) => {
        assert!(std::panic::catch_unwind(|| $run).is_err(), "block failed to panic");
    };
    ($run:block, $expected:literal) => {
        match std::panic::catch_unwind(|| $run) {
            Ok(_) => panic!("block failed to panic, expected {:?}", $expected),
            Err(payload) => {
                let message = $crate::util::panic::panic_message(&*payload);
                assert!(
                    message.contains($expected),
                    "block panicked with {:?}, expected {:?}", message, $expected
                );
            },
        }
    };
}

pub(crate) use assert_panics;

/// Extracts the message from a panic payload created by `panic!` with either a literal or a
/// formatted string.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
