//! Компоненты игрока: Player, HeadRig, PhysicsBody, GroundContact

use bevy::prelude::*;

/// Маркер player rig (единственный на симуляцию)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Pose головы/камеры (world space)
///
/// Заполняется адаптером из HMD tracking каждый тик; headless-прогоны
/// выставляют его сами. Симуляция head pose не интегрирует.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct HeadRig {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for HeadRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            forward: Vec3::NEG_Z,
        }
    }
}

impl HeadRig {
    /// Right-вектор камеры (перпендикуляр forward в горизонтальной плоскости)
    pub fn right(&self) -> Vec3 {
        let right = self.forward.cross(Vec3::Y);
        if right.length_squared() > 1e-8 {
            right.normalize()
        } else {
            // Взгляд строго вверх/вниз — берём мировой X
            Vec3::X
        }
    }

    /// Forward, спроецированный на горизонталь (yaw-направление тела)
    pub fn yaw_forward(&self) -> Vec3 {
        let flat = Vec3::new(self.forward.x, 0.0, self.forward.z);
        flat.normalize_or_zero()
    }
}

/// Тело игрока: velocity интегрируем сами (kinematic стиль)
///
/// Внешний движок может владеть настоящим rigidbody; headless-режим
/// интегрирует velocity → Transform напрямую.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    pub mass: f32,
    /// Сила гравитации (m/s²), применяется пока не grounded
    pub gravity: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: 70.0,
            gravity: -9.81,
        }
    }
}

/// Контакт с землёй (downward raycast через SceneQuery)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct GroundContact {
    pub grounded: bool,
}

/// Команда angular drag для внешнего rigidbody
///
/// Симуляция выбирает значение по boost/grounded/attached состоянию;
/// адаптер применяет его к rigidbody движка.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AngularDragCommand {
    pub drag: f32,
}

impl Default for AngularDragCommand {
    fn default() -> Self {
        Self { drag: 0.05 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_right_orthogonal() {
        let head = HeadRig {
            position: Vec3::ZERO,
            forward: Vec3::new(1.0, 0.0, 1.0).normalize(),
        };
        let right = head.right();
        assert!(right.dot(head.forward).abs() < 1e-5);
        assert!((right.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_head_right_degenerate_up() {
        let head = HeadRig {
            position: Vec3::ZERO,
            forward: Vec3::Y,
        };
        // Вертикальный взгляд не даёт NaN
        assert_eq!(head.right(), Vec3::X);
    }

    #[test]
    fn test_yaw_forward_flattens() {
        let head = HeadRig {
            position: Vec3::ZERO,
            forward: Vec3::new(0.0, 0.7, 0.7).normalize(),
        };
        let yaw = head.yaw_forward();
        assert_eq!(yaw.y, 0.0);
        assert!((yaw.length() - 1.0).abs() < 1e-5);
    }
}
