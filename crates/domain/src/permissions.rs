use crate::models::{Actor, Decision, DenialReason, Role};
use crate::settings::SpotlightSettings;

/// Decides which role, if any, entitles `actor` to pin a comment on the
/// post authored by `post_author`.
///
/// Precedence is explicit policy, first match wins:
/// 1. OP, when OP pinning is enabled and the actor authored the post;
/// 2. moderator with the `posts` or `all` permission;
/// 3. trusted-user allowlist (case-insensitive);
/// 4. denial.
///
/// An actor who is both OP and allowlisted is always treated as OP while
/// the OP toggle is on.
pub fn resolve(actor: &Actor, post_author: &str, settings: &SpotlightSettings) -> Decision {
    if settings.allow_op_pin && actor.username == post_author {
        return Decision::Allowed(Role::OriginalPoster);
    }

    if actor.can_moderate_posts() {
        return Decision::Allowed(Role::Moderator);
    }

    if settings.is_trusted(&actor.username) {
        return Decision::Allowed(Role::TrustedUser);
    }

    Decision::Denied(DenialReason::NotATrustedUser)
}
