//! AggressionController: FSM одного врага
//!
//! ```text
//! ALIVE/NEUTRAL --(elapsed > aggression_timer_limit)--> ALIVE/AGGRESSIVE
//! ALIVE/*       --(receive_damage → health 0)---------> DEAD
//! DEAD          --(elapsed since death > limit)-------> Despawn (terminal)
//! ```
//!
//! Все переходы только вперёд. Контроллер не знает про ECS: время, позиция
//! и цель приходят аргументами, результат: список `EnemyIntent`.

use bevy::prelude::*;
use rand::Rng;

use super::intents::{move_towards, CueKind, CueOutcome, CueTable, CueVariant, EnemyIntent};
use crate::config::{AggressionConfig, DamagePolicy};
use crate::host::{AnimatorFlag, AnimatorFloat, AnimatorSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum HealthState {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AggressionState {
    Neutral,
    Aggressive,
}

/// Контакт с другим entity (capability, не tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Player,
    Other,
}

/// Per-tick выборка для animator (forward/turn считаются из pursuit)
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
struct MotionSample {
    forward_speed: f32,
    turn_amount: f32,
    facing_yaw: Option<f32>,
}

#[derive(Debug, Clone, Reflect)]
pub struct AggressionController {
    health_state: HealthState,
    aggression_state: AggressionState,
    health: f32,

    aggression_timer: f32,
    aggression_timer_limit: f32,
    pursue_rate: f32,

    death_timer: f32,
    death_time_limit: f32,
    removal_issued: bool,

    damage_policy: DamagePolicy,
    cues: CueTable,

    motion: MotionSample,
    damaged: bool,
    attacking: bool,
    attack_pending: bool,
}

impl AggressionController {
    /// Spawn: per-instance draws (pursue rate, aggression delay, death linger)
    pub fn spawn<R: Rng + ?Sized>(now: f32, config: &AggressionConfig, rng: &mut R) -> Self {
        let pursue_rate = config.pursue_rate.sample(rng);
        let aggression_timer_limit = config.aggression_delay.sample(rng);
        let death_time_limit = config.death_linger.sample(rng);

        Self {
            health_state: HealthState::Alive,
            aggression_state: AggressionState::Neutral,
            health: config.max_health,
            aggression_timer: now,
            aggression_timer_limit,
            pursue_rate,
            death_timer: 0.0,
            death_time_limit,
            removal_issued: false,
            damage_policy: config.damage_policy,
            cues: CueTable::from(config.cue_weights),
            motion: MotionSample::default(),
            damaged: false,
            attacking: false,
            attack_pending: false,
        }
    }

    pub fn health_state(&self) -> HealthState {
        self.health_state
    }

    pub fn aggression_state(&self) -> AggressionState {
        self.aggression_state
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health_state == HealthState::Alive
    }

    pub fn pursue_rate(&self) -> f32 {
        self.pursue_rate
    }

    pub fn aggression_timer_limit(&self) -> f32 {
        self.aggression_timer_limit
    }

    pub fn death_time_limit(&self) -> f32 {
        self.death_time_limit
    }

    /// Время смерти (None пока жив)
    pub fn death_timer(&self) -> Option<f32> {
        match self.health_state {
            HealthState::Alive => None,
            HealthState::Dead => Some(self.death_timer),
        }
    }

    /// Despawn уже выдан: инстанс мёртв для всех операций
    pub fn is_removed(&self) -> bool {
        self.removal_issued
    }

    /// Переопределить лимит агрессии (host tuning, сценарии)
    pub fn with_aggression_timer_limit(mut self, limit: f32) -> Self {
        self.aggression_timer_limit = limit;
        self
    }

    pub fn with_death_time_limit(mut self, limit: f32) -> Self {
        self.death_time_limit = limit;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health.max(0.0);
        self
    }

    /// Один шаг симуляции
    ///
    /// `target`: позиция цели или None (цель уничтожена/не назначена → стоим).
    /// Переход NEUTRAL → AGGRESSIVE сам по себе не двигает врага: pursuit
    /// начинается со следующего тика.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        delta: f32,
        position: Vec3,
        target: Option<Vec3>,
        rng: &mut R,
    ) -> Vec<EnemyIntent> {
        let mut intents = Vec::new();
        if self.removal_issued {
            return intents;
        }

        // контакт мог прийти до тика в этом же кадре
        self.attacking = std::mem::take(&mut self.attack_pending);
        self.motion.forward_speed = 0.0;
        self.motion.turn_amount = 0.0;

        match self.health_state {
            HealthState::Dead => {
                if now - self.death_timer > self.death_time_limit {
                    self.removal_issued = true;
                    intents.push(EnemyIntent::Despawn);
                }
            }
            HealthState::Alive => match self.aggression_state {
                AggressionState::Neutral => {
                    if now - self.aggression_timer > self.aggression_timer_limit {
                        self.aggression_state = AggressionState::Aggressive;
                        intents.push(EnemyIntent::PlayCue {
                            cue: CueKind::Aggression,
                            outcome: self.cues.draw(rng),
                        });
                    }
                }
                AggressionState::Aggressive => {
                    if let Some(target) = target {
                        self.pursue(position, target, delta, &mut intents);
                    }
                }
            },
        }

        intents
    }

    fn pursue(&mut self, position: Vec3, target: Vec3, delta: f32, intents: &mut Vec<EnemyIntent>) {
        let to_target = target - position;
        let facing = to_target.normalize_or_zero();

        if facing != Vec3::ZERO {
            let yaw = facing.x.atan2(facing.z);
            if let Some(previous) = self.motion.facing_yaw {
                self.motion.turn_amount = wrap_angle(yaw - previous);
            }
            self.motion.facing_yaw = Some(yaw);
            intents.push(EnemyIntent::Pursue { facing });
        }

        let step = move_towards(position, target, self.pursue_rate).distance(position);
        if delta > 0.0 {
            self.motion.forward_speed = step / delta;
        }

        intents.push(EnemyIntent::MoveToward {
            target,
            max_distance: self.pursue_rate,
        });
    }

    /// Урон от источника в `origin`
    ///
    /// После смерти: no-op (повторный cue/impulse не эмитится).
    pub fn receive_damage<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        amount: f32,
        origin: Vec3,
        position: Vec3,
        rng: &mut R,
    ) -> Vec<EnemyIntent> {
        let mut intents = Vec::new();
        if self.health_state == HealthState::Dead {
            return intents;
        }
        if !amount.is_finite() || amount <= 0.0 {
            crate::logger::log_warning(&format!("Enemy: ignoring invalid damage amount {}", amount));
            return intents;
        }

        self.damaged = true;
        self.health = match self.damage_policy {
            DamagePolicy::LethalOnAnyHit => 0.0,
            DamagePolicy::Proportional => self.health - amount,
        };

        if self.health > 0.0 {
            intents.push(EnemyIntent::PlayCue {
                cue: CueKind::Hurt,
                outcome: CueOutcome::Play(CueVariant(0)),
            });
            return intents;
        }

        self.health = 0.0;
        self.health_state = HealthState::Dead;
        self.death_timer = now;
        self.motion = MotionSample::default();

        intents.push(EnemyIntent::PlayCue {
            cue: CueKind::Death,
            outcome: self.cues.draw(rng),
        });
        intents.push(EnemyIntent::ApplyImpulse {
            direction: (position - origin).normalize_or_zero(),
            magnitude: amount,
            at: origin,
        });
        intents.push(EnemyIntent::Detag);

        intents
    }

    /// Коллизия с другим entity
    pub fn on_contact<R: Rng + ?Sized>(&mut self, contact: Contact, rng: &mut R) -> Vec<EnemyIntent> {
        if self.health_state == HealthState::Dead || contact != Contact::Player {
            return Vec::new();
        }

        self.attack_pending = true;
        vec![EnemyIntent::PlayCue {
            cue: CueKind::Attack,
            outcome: self.cues.draw(rng),
        }]
    }

    /// Параметры для animator blending (раз в тик)
    pub fn write_animator(&self, sink: &mut impl AnimatorSink) {
        sink.set_float(AnimatorFloat::ForwardSpeed, self.motion.forward_speed);
        sink.set_float(AnimatorFloat::TurnAmount, self.motion.turn_amount);
        sink.set_flag(AnimatorFlag::Damaged, self.damaged);
        sink.set_flag(AnimatorFlag::Dead, self.health_state == HealthState::Dead);
        sink.set_flag(AnimatorFlag::Attacking, self.attacking);
    }
}

/// Угол в (-PI, PI]
fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
