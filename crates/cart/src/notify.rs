//! User-facing failure notifications.
//!
//! Cart operations never surface raw errors to the user; they emit one of a
//! fixed set of localized messages through a [`Notifier`]. Notifications are
//! fire-and-forget and there are no success notifications.

use std::fmt;

/// A user-facing notification emitted when a cart operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The product could not be added to the cart.
    CouldNotAddProduct,
    /// The requested quantity exceeds available stock.
    OutOfStock,
    /// The product could not be removed from the cart.
    CouldNotRemoveProduct,
    /// The product's quantity could not be changed.
    CouldNotUpdateAmount,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::CouldNotAddProduct => "Erro na adição do produto",
            Self::OutOfStock => "Quantidade solicitada fora de estoque",
            Self::CouldNotRemoveProduct => "Erro na remoção do produto",
            Self::CouldNotUpdateAmount => "Erro na alteração de quantidade do produto",
        };
        f.write_str(message)
    }
}

/// Sink for user-facing notifications.
///
/// Implementations must not block and must not fail; a notification that
/// cannot be delivered is dropped.
pub trait Notifier: Send + Sync {
    /// Deliver a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Notifier that emits notices to the structured log.
///
/// The default sink for headless consumers; UI layers provide their own
/// implementation (e.g., a toast).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = ?notice, "{notice}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            Notice::CouldNotAddProduct.to_string(),
            "Erro na adição do produto"
        );
        assert_eq!(
            Notice::OutOfStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            Notice::CouldNotRemoveProduct.to_string(),
            "Erro na remoção do produto"
        );
        assert_eq!(
            Notice::CouldNotUpdateAmount.to_string(),
            "Erro na alteração de quantidade do produto"
        );
    }
}
