use std::fmt;

use crate::color::Color;
use crate::error::SchemeError;

/// One of the sixteen base16 slots, `base00` through `base0F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(u8);

impl Role {
    pub const COUNT: usize = 16;

    pub const BASE00: Role = Role(0x00);
    pub const BASE01: Role = Role(0x01);
    pub const BASE05: Role = Role(0x05);
    pub const BASE06: Role = Role(0x06);
    pub const BASE07: Role = Role(0x07);
    pub const BASE08: Role = Role(0x08);
    pub const BASE09: Role = Role(0x09);
    pub const BASE0A: Role = Role(0x0A);
    pub const BASE0B: Role = Role(0x0B);
    pub const BASE0C: Role = Role(0x0C);
    pub const BASE0D: Role = Role(0x0D);
    pub const BASE0E: Role = Role(0x0E);
    pub const BASE0F: Role = Role(0x0F);

    pub fn new(index: usize) -> Option<Role> {
        (index < Self::COUNT).then_some(Role(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All roles in ascending order.
    pub fn all() -> impl Iterator<Item = Role> {
        (0..Self::COUNT as u8).map(Role)
    }

    /// Key used in scheme files, e.g. `base0A`.
    pub fn name(self) -> String {
        format!("base{:02X}", self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base{:02X}", self.0)
    }
}

/// Target colors for roles with a conventional meaning, in processing order.
///
/// Matching is greedy: an earlier role takes its nearest color even when a
/// later role would have matched it better.
pub const IDEAL_COLORS: [(Role, Color); 9] = [
    (Role::BASE00, Color::new(0x00, 0x00, 0x00)), // black
    (Role::BASE05, Color::new(0xC0, 0xC0, 0xC0)), // silver
    (Role::BASE07, Color::new(0xFF, 0xFF, 0xFF)), // white
    (Role::BASE08, Color::new(0xFF, 0x00, 0x00)), // red
    (Role::BASE0A, Color::new(0xFF, 0xFF, 0x00)), // yellow
    (Role::BASE0B, Color::new(0x00, 0xFF, 0x00)), // green
    (Role::BASE0C, Color::new(0x00, 0xFF, 0xFF)), // cyan
    (Role::BASE0D, Color::new(0x00, 0x00, 0xFF)), // blue
    (Role::BASE0E, Color::new(0xFF, 0x00, 0xFF)), // magenta
];

/// Role bindings under construction plus the pool of palette colors not yet
/// bound to any role.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    slots: [Option<Color>; Role::COUNT],
    pool: Vec<Color>,
}

impl Assignment {
    /// Start with every role unbound and `pool` available.
    pub fn new(pool: Vec<Color>) -> Self {
        Self {
            slots: [None; Role::COUNT],
            pool,
        }
    }

    pub fn get(&self, role: Role) -> Option<Color> {
        self.slots[role.index()]
    }

    pub fn pool(&self) -> &[Color] {
        &self.pool
    }

    /// Bind `color` to `role`, returning whatever was bound before.
    pub fn bind(&mut self, role: Role, color: Color) -> Option<Color> {
        self.slots[role.index()].replace(color)
    }

    /// Unbind `role` and put its color back into the pool.
    pub fn recycle(&mut self, role: Role) -> Option<Color> {
        let freed = self.slots[role.index()].take()?;
        self.pool.push(freed);
        Some(freed)
    }

    /// Remove and return the pool color nearest to `target`.
    /// Ties go to the earliest pool entry.
    pub fn take_nearest(&mut self, target: Color) -> Option<Color> {
        let mut best: Option<(usize, f32)> = None;
        for (i, color) in self.pool.iter().enumerate() {
            let dist = color.distance(target);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| self.pool.remove(i))
    }

    pub fn unbound_roles(&self) -> Vec<Role> {
        Role::all().filter(|r| self.get(*r).is_none()).collect()
    }

    pub(crate) fn pool_mut(&mut self) -> &mut Vec<Color> {
        &mut self.pool
    }

    /// All sixteen colors, if every role is bound and the pool is drained.
    pub fn finish(self) -> Result<[Color; Role::COUNT], SchemeError> {
        if !self.pool.is_empty() {
            return Err(SchemeError::AssignmentExhaustion(format!(
                "{} palette colors left unassigned",
                self.pool.len()
            )));
        }
        let mut colors = [Color::BLACK; Role::COUNT];
        for role in Role::all() {
            colors[role.index()] = self.get(role).ok_or_else(|| {
                SchemeError::AssignmentExhaustion(format!("{role} has no color"))
            })?;
        }
        Ok(colors)
    }
}

/// Bind every ideal role to its nearest color in the normalized palette,
/// removing each matched color from the pool.
pub fn assign_ideal(palette: Vec<Color>) -> Result<Assignment, SchemeError> {
    if palette.len() < IDEAL_COLORS.len() {
        return Err(SchemeError::InsufficientPalette {
            available: palette.len(),
            required: IDEAL_COLORS.len(),
        });
    }

    let mut assignment = Assignment::new(palette);
    for (matched, &(role, ideal)) in IDEAL_COLORS.iter().enumerate() {
        let color = assignment.take_nearest(ideal).ok_or(SchemeError::InsufficientPalette {
            available: 0,
            required: IDEAL_COLORS.len() - matched,
        })?;
        tracing::debug!(%role, %color, %ideal, "matched ideal color");
        assignment.bind(role, color);
    }

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread_palette() -> Vec<Color> {
        vec![
            Color::new(10, 10, 10),
            Color::new(190, 190, 190),
            Color::new(250, 250, 250),
            Color::new(220, 30, 30),
            Color::new(230, 220, 40),
            Color::new(40, 210, 40),
            Color::new(40, 210, 210),
            Color::new(30, 30, 220),
            Color::new(210, 40, 210),
            Color::new(120, 80, 40),
            Color::new(90, 90, 90),
            Color::new(60, 60, 60),
            Color::new(140, 140, 140),
            Color::new(200, 100, 50),
            Color::new(50, 100, 200),
            Color::new(100, 200, 50),
        ]
    }

    #[test]
    fn role_names() {
        assert_eq!(Role::BASE00.name(), "base00");
        assert_eq!(Role::BASE0A.to_string(), "base0A");
        assert_eq!(Role::new(15), Some(Role::BASE0F));
        assert_eq!(Role::new(16), None);
        assert_eq!(Role::all().count(), 16);
    }

    #[test]
    fn ideal_roles_take_their_nearest_colors() {
        let assignment = assign_ideal(spread_palette()).unwrap();
        assert_eq!(assignment.get(Role::BASE00), Some(Color::new(10, 10, 10)));
        assert_eq!(assignment.get(Role::BASE05), Some(Color::new(190, 190, 190)));
        assert_eq!(assignment.get(Role::BASE07), Some(Color::new(250, 250, 250)));
        assert_eq!(assignment.get(Role::BASE08), Some(Color::new(220, 30, 30)));
        assert_eq!(assignment.get(Role::BASE0A), Some(Color::new(230, 220, 40)));
        assert_eq!(assignment.get(Role::BASE0B), Some(Color::new(40, 210, 40)));
        assert_eq!(assignment.get(Role::BASE0C), Some(Color::new(40, 210, 210)));
        assert_eq!(assignment.get(Role::BASE0D), Some(Color::new(30, 30, 220)));
        assert_eq!(assignment.get(Role::BASE0E), Some(Color::new(210, 40, 210)));
        assert_eq!(assignment.pool().len(), 7);
    }

    #[test]
    fn matched_colors_leave_the_pool() {
        let assignment = assign_ideal(spread_palette()).unwrap();
        for (role, _) in IDEAL_COLORS {
            let color = assignment.get(role).unwrap();
            assert!(!assignment.pool().contains(&color), "{role} color still pooled");
        }
    }

    #[test]
    fn earlier_role_wins_a_contested_color() {
        // One near-white color: base05 (silver) is processed before base07
        // (white) and claims it even though white is the closer target.
        let mut palette = vec![Color::new(250, 250, 250)];
        palette.extend(std::iter::repeat(Color::new(0, 0, 0)).take(8));
        let assignment = assign_ideal(palette).unwrap();
        assert_eq!(assignment.get(Role::BASE05), Some(Color::new(250, 250, 250)));
        assert_eq!(assignment.get(Role::BASE07), Some(Color::BLACK));
    }

    #[test]
    fn ties_go_to_the_earliest_pool_entry() {
        let mut assignment = Assignment::new(vec![
            Color::new(10, 0, 0),
            Color::new(0, 10, 0),
            Color::new(0, 0, 10),
        ]);
        assert_eq!(assignment.take_nearest(Color::BLACK), Some(Color::new(10, 0, 0)));
        assert_eq!(assignment.pool().len(), 2);
    }

    #[test]
    fn short_palette_is_insufficient() {
        let err = assign_ideal(vec![Color::BLACK; 8]).unwrap_err();
        assert!(matches!(
            err,
            SchemeError::InsufficientPalette {
                available: 8,
                required: 9
            }
        ));
    }

    #[test]
    fn recycle_returns_color_to_pool() {
        let mut assignment = Assignment::new(Vec::new());
        assignment.bind(Role::BASE05, Color::WHITE);
        assert_eq!(assignment.recycle(Role::BASE05), Some(Color::WHITE));
        assert_eq!(assignment.get(Role::BASE05), None);
        assert_eq!(assignment.pool(), &[Color::WHITE]);
        assert_eq!(assignment.recycle(Role::BASE05), None);
    }

    #[test]
    fn finish_rejects_leftovers_and_gaps() {
        let mut full = Assignment::new(vec![Color::WHITE]);
        for role in Role::all() {
            full.bind(role, Color::BLACK);
        }
        assert!(matches!(
            full.finish(),
            Err(SchemeError::AssignmentExhaustion(_))
        ));

        let gap = Assignment::new(Vec::new());
        assert!(matches!(
            gap.finish(),
            Err(SchemeError::AssignmentExhaustion(_))
        ));
    }
}
