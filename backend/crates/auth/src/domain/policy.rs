//! Role Policy
//!
//! Pure authorization decisions over verified roles. The gate and the
//! admin user surface consult these functions; nothing here touches a
//! store or the clock.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Policy violations from the admin user surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("a super admin cannot remove their own super admin role")]
    SelfDemotion,
    #[error("an administrator cannot delete their own account")]
    SelfDeletion,
}

/// Whether `role` satisfies `required`.
///
/// Roles are rank-ordered; a higher role always satisfies a lower
/// requirement. The admin surface requires [`UserRole::Admin`].
#[inline]
pub fn permits(role: UserRole, required: UserRole) -> bool {
    role.rank() >= required.rank()
}

/// Guard for role changes on the admin user surface.
///
/// A super admin may not demote themselves: the system would otherwise
/// be one misclick away from having no super admin at all.
pub fn guard_role_change(
    actor_id: &UserId,
    actor_role: UserRole,
    target_id: &UserId,
    new_role: UserRole,
) -> Result<(), PolicyViolation> {
    if actor_id == target_id && actor_role.is_super_admin() && !new_role.is_super_admin() {
        return Err(PolicyViolation::SelfDemotion);
    }
    Ok(())
}

/// Guard for user deletion on the admin user surface.
///
/// Self-deletion is refused for every actor, which also covers the
/// super-admin lockout case.
pub fn guard_user_delete(actor_id: &UserId, target_id: &UserId) -> Result<(), PolicyViolation> {
    if actor_id == target_id {
        return Err(PolicyViolation::SelfDeletion);
    }
    Ok(())
}
