use ledgerly_core::UserId;

/// Authenticated identity for a request, derived from a verified bearer
/// token by the auth middleware. Present on all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
}
