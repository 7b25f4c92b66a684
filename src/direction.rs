use nalgebra as na;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Coarse compass heading in image coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Direction {
    pub horizontal: Option<Horizontal>,
    pub vertical: Option<Vertical>,
}

impl Direction {
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.horizontal {
            Some(Horizontal::Left) => "LEFT",
            Some(Horizontal::Right) => "RIGHT",
            None => "",
        };
        let v = match self.vertical {
            Some(Vertical::Up) => "UP",
            Some(Vertical::Down) => "DOWN",
            None => "",
        };

        match (h.is_empty(), v.is_empty()) {
            (true, true) => f.write_str("STATIONARY"),
            (false, false) => write!(f, "{} {}", h, v),
            _ => write!(f, "{}{}", h, v),
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
pub struct DirectionLabeler {
    pub threshold: f32,
}

impl DirectionLabeler {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn label(&self, velocity: &na::Vector2<i32>) -> Direction {
        let (dx, dy) = (velocity.x as f32, velocity.y as f32);

        let horizontal = if dx > self.threshold {
            Some(Horizontal::Right)
        } else if dx < -self.threshold {
            Some(Horizontal::Left)
        } else {
            None
        };

        let vertical = if dy > self.threshold {
            Some(Vertical::Down)
        } else if dy < -self.threshold {
            Some(Vertical::Up)
        } else {
            None
        };

        Direction {
            horizontal,
            vertical,
        }
    }
}
