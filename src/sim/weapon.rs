//! Weapon catalog and playable characters

use serde::Serialize;

/// A weapon definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub name: &'static str,
    pub damage: i32,
    /// Projectile speed at reference scale (pixels per tick)
    pub speed: f32,
    /// Projectile footprint at reference scale
    pub width: f32,
    pub height: f32,
}

/// Fixed weapon order; "next weapon" walks this list with wraparound
pub const WEAPONS: [Weapon; 10] = [
    Weapon { name: "Bone", damage: 2, speed: 10.0, width: 20.0, height: 10.0 },
    Weapon { name: "Laser", damage: 5, speed: 20.0, width: 30.0, height: 5.0 },
    Weapon { name: "Ball", damage: 3, speed: 12.0, width: 15.0, height: 15.0 },
    Weapon { name: "Fire", damage: 8, speed: 8.0, width: 20.0, height: 20.0 },
    Weapon { name: "Plasma", damage: 4, speed: 15.0, width: 25.0, height: 25.0 },
    Weapon { name: "Ray", damage: 10, speed: 25.0, width: 40.0, height: 5.0 },
    Weapon { name: "Ice", damage: 3, speed: 12.0, width: 18.0, height: 18.0 },
    Weapon { name: "Poison", damage: 2, speed: 10.0, width: 15.0, height: 15.0 },
    Weapon { name: "Stone", damage: 6, speed: 12.0, width: 20.0, height: 20.0 },
    Weapon { name: "Super Bark", damage: 20, speed: 6.0, width: 50.0, height: 50.0 },
];

/// Look up a weapon; out-of-range indices wrap
pub fn weapon(index: usize) -> &'static Weapon {
    &WEAPONS[index % WEAPONS.len()]
}

/// Index of the weapon after `index`
pub fn next_weapon_index(index: usize) -> usize {
    (index + 1) % WEAPONS.len()
}

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Character {
    #[default]
    Dino,
    Bob,
    Nina,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::Dino, Character::Bob, Character::Nina];

    pub fn name(&self) -> &'static str {
        match self {
            Character::Dino => "DINO",
            Character::Bob => "BOB",
            Character::Nina => "NINA",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Character::Dino => Character::Bob,
            Character::Bob => Character::Nina,
            Character::Nina => Character::Dino,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_cycle_wraps() {
        let mut index = 0;
        for _ in 0..WEAPONS.len() {
            index = next_weapon_index(index);
        }
        assert_eq!(index, 0);
        assert_eq!(weapon(WEAPONS.len() + 1).name, "Laser");
    }

    #[test]
    fn test_character_cycle_wraps() {
        let mut c = Character::default();
        for _ in 0..Character::ALL.len() {
            c = c.next();
        }
        assert_eq!(c, Character::Dino);
        assert_eq!(Character::Bob.name(), "BOB");
    }
}
