//! Boost-компоненты: BoostMeter, TapTracker, SparkState

use bevy::prelude::*;

/// Истощаемый boost-метр руки
///
/// Инвариант: 0.0 ≤ current ≤ max. Регенерации нет — метр только
/// расходуется (см. DESIGN.md, open question).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BoostMeter {
    pub current: f32,
    pub max: f32,
}

impl Default for BoostMeter {
    fn default() -> Self {
        Self::new(200.0)
    }
}

impl BoostMeter {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Метр с начальным значением, зажатым в [0, max]
    pub fn with_initial(max: f32, initial: f32) -> Self {
        Self {
            current: initial.clamp(0.0, max),
            max,
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    /// Разовый расход (double-tap). false — не хватило, метр не тронут.
    pub fn consume(&mut self, cost: f32) -> bool {
        if self.can_afford(cost) {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    /// Непрерывный расход: снимает min(current, amount), пол на нуле
    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

/// Детектор double-tap по таймстампам нажатий
///
/// Потребивший тап сбрасывает таймстамп: второй тап пары не может
/// открыть новое окно (иначе тройное нажатие списало бы два заряда).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TapTracker {
    pub last_press: Option<f32>,
}

impl TapTracker {
    /// Регистрирует нажатие; true — double-tap срабатывает
    ///
    /// Второй тап внутри окна без метра (`can_afford == false`) не
    /// срабатывает и ведёт себя как первый тап нового окна.
    pub fn register_press(&mut self, now: f32, window: f32, can_afford: bool) -> bool {
        match self.last_press {
            Some(prev) if now - prev < window && can_afford => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

/// Состояние spark-эффекта руки (loop + auto-stop таймер release-вспышки)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SparkState {
    /// Loop сейчас играет (edge-детект для событий адаптеру)
    pub looping: bool,
    /// Остаток времени release-вспышки; по истечении — LoopStop
    pub stop_timer: Option<f32>,
}
