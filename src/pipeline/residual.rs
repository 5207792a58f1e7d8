use rand::seq::SliceRandom;
use rand::Rng;

use crate::color::Color;
use crate::error::SchemeError;
use crate::pipeline::assign::{Assignment, Role};

/// Hand the remaining pool colors to the roles that are still unbound.
///
/// The pool is shuffled once with `rng`, then one color is popped for each
/// unbound role in ascending role order. Fails unless this binds every role
/// and drains the pool exactly.
pub fn assign_residual<R: Rng + ?Sized>(
    mut assignment: Assignment,
    rng: &mut R,
) -> Result<[Color; Role::COUNT], SchemeError> {
    assignment.pool_mut().shuffle(rng);

    for role in assignment.unbound_roles() {
        let color = assignment.pool_mut().pop().ok_or_else(|| {
            SchemeError::AssignmentExhaustion(format!("palette ran out before {role}"))
        })?;
        tracing::debug!(%role, %color, "residual assignment");
        assignment.bind(role, color);
    }

    assignment.finish()
}
