//! Per-frame update and game flow
//!
//! One call to `tick` handles input, then advances the session by `dt`.
//! The order inside `update` is fixed: ball motion, bricks (level order),
//! paddle, power-up pickup, effect timers, power-up aging, loss, win.

use super::collision::check_ball_box;
use super::powerup;
use super::resolve::{BrickHit, bounce_off_paddle, resolve_brick};
use super::state::{GameEvent, GameMode, GameState};
use crate::consts::*;
use crate::input::{InputState, Key};

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &mut InputState, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

fn set_mode(state: &mut GameState, mode: GameMode) {
    if state.mode != mode {
        log::info!("{:?} -> {:?} (level {})", state.mode, mode, state.level);
        state.mode = mode;
    }
}

/// Apply player input for the current mode
pub fn process_input(state: &mut GameState, input: &mut InputState, dt: f32) {
    match state.mode {
        GameMode::Active => {
            let velocity = PLAYER_VELOCITY * dt;
            let field = &mut state.field;
            if input.is_held(Key::Left) && field.paddle.pos.x >= 0.0 {
                field.paddle.pos.x -= velocity;
                if field.ball.stuck {
                    field.ball.body.pos.x -= velocity;
                }
            }
            if input.is_held(Key::Right) && field.paddle.pos.x <= field.width - field.paddle.size.x
            {
                field.paddle.pos.x += velocity;
                if field.ball.stuck {
                    field.ball.body.pos.x += velocity;
                }
            }
            if input.take_press(Key::Launch) && field.ball.stuck {
                field.ball.stuck = false;
            }
        }
        GameMode::Menu => {
            let count = state.levels.len();
            if input.take_press(Key::Next) {
                state.level = (state.level + 1) % count;
                log::info!("Selected level {}", state.level);
            }
            if input.take_press(Key::Previous) {
                state.level = (state.level + count - 1) % count;
                log::info!("Selected level {}", state.level);
            }
            if input.take_press(Key::Confirm) {
                set_mode(state, GameMode::Active);
            }
        }
        GameMode::Win => {
            if input.take_press(Key::Confirm) {
                state.field.effects.chaos = false;
                set_mode(state, GameMode::Menu);
            }
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    if state.mode != GameMode::Active {
        state.field.effects.update(dt);
        return;
    }

    let width = state.field.width;
    state.field.ball.advance(dt, width);

    brick_collisions(state);
    paddle_collision(state);
    collect_power_ups(state);
    state.field.effects.update(dt);
    age_power_ups(state, dt);

    check_loss(state);
    check_win(state);
}

/// Test every live brick in level order. Responses apply immediately, so a
/// brick later in the list sees the ball as already deflected this frame.
fn brick_collisions(state: &mut GameState) {
    let level = &mut state.levels[state.level];
    let field = &mut state.field;
    let mut broken = Vec::new();

    for brick in level.bricks.iter_mut().filter(|b| !b.destroyed) {
        let collision = check_ball_box(&field.ball.circle(), &brick.aabb());
        if !collision.hit {
            continue;
        }
        match resolve_brick(&mut field.ball, brick, &collision) {
            BrickHit::Broken => {
                state.events.push(GameEvent::BrickBroken { pos: brick.pos });
                broken.push(brick.pos);
            }
            BrickHit::Solid => {
                field.effects.start_shake(SHAKE_TIME);
                state.events.push(GameEvent::SolidBrickHit);
            }
        }
    }

    for pos in broken {
        state.spawn_power_ups(pos);
    }
}

fn paddle_collision(state: &mut GameState) {
    let field = &mut state.field;
    if field.ball.stuck {
        return;
    }
    let collision = check_ball_box(&field.ball.circle(), &field.paddle.aabb());
    if collision.hit {
        bounce_off_paddle(&mut field.ball, &field.paddle);
        state.events.push(GameEvent::PaddleHit);
    }
}

fn collect_power_ups(state: &mut GameState) {
    for kind in powerup::collect(&mut state.power_ups, &mut state.field) {
        log::debug!("Collected {}", kind.name());
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn age_power_ups(state: &mut GameState, dt: f32) {
    for kind in powerup::age(&mut state.power_ups, &mut state.field, dt) {
        log::debug!("{} wore off", kind.name());
        state.events.push(GameEvent::PowerUpExpired(kind));
    }
}

/// Ball fell out the bottom: lose a life, and the game on the last one
fn check_loss(state: &mut GameState) {
    if state.field.ball.body.pos.y < state.field.height {
        return;
    }
    state.field.lives = state.field.lives.saturating_sub(1);
    let lives_left = state.field.lives;
    log::info!("Ball lost, {} lives left", lives_left);
    state.events.push(GameEvent::LifeLost { lives_left });

    if lives_left == 0 {
        state.reset_level();
        set_mode(state, GameMode::Menu);
        state.events.push(GameEvent::GameOver);
    }
    state.reset_player();
}

/// Every breakable brick gone: reset and celebrate
fn check_win(state: &mut GameState) {
    if state.mode != GameMode::Active || !state.current_level().is_completed() {
        return;
    }
    let level = state.level;
    state.reset_level();
    state.reset_player();
    state.field.effects.chaos = true;
    set_mode(state, GameMode::Win);
    state.events.push(GameEvent::LevelCompleted { level });
}
