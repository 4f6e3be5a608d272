//! Spring-damper интегратор волны каната
//!
//! Один скаляр на канат: им взвешивается синусоида в sampler'е.
//! Semi-implicit Euler, значение зажато в [-1,1] — волна не разносится
//! при любых конечных stiffness/damping.

/// Один шаг интегратора. target всегда 0 в симуляции (канат
/// успокаивается в прямую), но параметром — для тестов.
pub fn integrate(
    value: &mut f32,
    velocity: &mut f32,
    target: f32,
    strength: f32,
    damper: f32,
    dt: f32,
) {
    let force = -strength * (*value - target) - damper * *velocity;
    *velocity += force * dt;
    *value += *velocity * dt;
    *value = value.clamp(-1.0, 1.0);
}
