mod account;
mod auth;
mod interactions;
mod library;

pub use account::Account;
pub use account::AccountError;
pub use account::AccountManager;
pub use account::SessionManager;
pub use auth::TokenManager;
pub use interactions::Interactions;
pub use interactions::InteractionsError;
pub use interactions::InteractionsManager;
pub use library::LibraryError;
pub use library::LibraryManager;
pub use library::SongKind;
