//! Browser render shells over the session controller.
//!
//! The shell owns the one `GameSession` of the page in a thread-local, builds
//! the DOM (HUD, canvas arrow panel, menu and game-over panels), forwards clicks
//! and directional input to the controller, and redraws from
//! [`GameSession::snapshot`] on every animation frame. Each frame polls
//! [`GameSession::check_timeout`] before drawing the countdown, so the time
//! budget is enforced to within one frame.
//!
//! Two input variants share everything except how a direction is produced:
//! [`InputMode::Keyboard`] listens for arrow keys on the document,
//! [`InputMode::Buttons`] adds four clickable arrow buttons under the panel.

mod buttons;
mod keyboard;

pub use keyboard::{KEY_REPEAT_WINDOW_MS, KeyDebounce};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::game::{Direction, GameSession, Phase, Rules, RulesError, SessionRng, Verdict};

/// How long the panel tints green/red after an answer.
const FEEDBACK_MS: f64 = 150.0;

const MENU_HELP: &str = "<h3>How to play</h3>\
<ol>\
<li>Watch the arrow that appears on screen.</li>\
<li>Press the matching direction (↑ ↓ ← →).</li>\
<li>Answer before the time runs out.</li>\
<li>Every 5 correct answers in a row raise the level and speed things up.</li>\
<li>You have 3 lives; a wrong answer or a timeout costs one.</li>\
</ol>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Keyboard,
    Buttons,
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
    static RULES: Cell<Rules> = Cell::new(Rules::default());
}

/// DOM handles the shell redraws each frame.
struct Stage {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    score: HtmlElement,
    level: HtmlElement,
    lives: HtmlElement,
    timer: HtmlElement,
    menu: HtmlElement,
    playing: HtmlElement,
    game_over: HtmlElement,
    summary: HtmlElement,
}

pub(crate) struct Shell {
    session: GameSession,
    stage: Stage,
    feedback: Option<(Verdict, f64)>,
}

pub(crate) fn with_shell<R>(f: impl FnOnce(&mut Shell) -> R) -> Option<R> {
    SHELL.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Rules for games started after this call. A running page picks them up on
/// its next start or restart.
pub fn configure(rules: Rules) -> Result<(), RulesError> {
    rules.validate()?;
    RULES.with(|r| r.set(rules));
    if let Some(result) = with_shell(|shell| shell.session.set_rules(rules)) {
        result?;
    }
    log::info!("rules updated: {:?}", rules);
    Ok(())
}

#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Option<Result<String, serde_json::Error>> {
    with_shell(|shell| serde_json::to_string(&shell.session.snapshot()))
}

pub fn launch(mode: InputMode) -> Result<(), JsValue> {
    if SHELL.with(|cell| cell.borrow().is_some()) {
        log::warn!("game page already running, ignoring second launch");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let stage = build_stage(&doc)?;
    match mode {
        InputMode::Keyboard => keyboard::install(&doc)?,
        InputMode::Buttons => buttons::install(&doc, &stage.playing)?,
    }

    let now = now_ms();
    let rules = RULES.with(|r| r.get());
    let session = GameSession::new(rules, SessionRng::from_entropy(now.to_bits()));
    let mut shell = Shell {
        session,
        stage,
        feedback: None,
    };
    shell.render(now);
    SHELL.with(|cell| cell.replace(Some(shell)));

    start_frame_loop();
    log::info!("game page ready ({:?} input)", mode);
    Ok(())
}

impl Shell {
    pub(crate) fn respond(&mut self, direction: Direction, now: f64) {
        let verdict = self.session.submit_response(direction, now);
        if verdict != Verdict::Ignored {
            self.feedback = Some((verdict, now));
        }
        self.render(now);
    }

    fn tick(&mut self, now: f64) {
        if let Some(verdict) = poll_timeout(&mut self.session, now) {
            self.feedback = Some((verdict, now));
        }
        self.render(now);
    }

    fn render(&mut self, now: f64) {
        let snap = self.session.snapshot();
        let stage = &self.stage;

        set_visible(&stage.menu, snap.phase == Phase::Menu);
        set_visible(&stage.playing, snap.phase == Phase::Playing);
        set_visible(&stage.game_over, snap.phase == Phase::GameOver);

        stage.score.set_text_content(Some(&format!("Score: {}", snap.score)));
        stage.level.set_text_content(Some(&format!("Level {}", snap.level)));
        stage
            .lives
            .set_inner_html(&hearts_html(snap.lives, self.session.rules().initial_lives));
        let timer = self
            .session
            .remaining_seconds(now)
            .map(|left| format!("{left:.1}s"))
            .unwrap_or_default();
        stage.timer.set_text_content(Some(&timer));

        if self.feedback.is_some_and(|(_, at)| now - at >= FEEDBACK_MS) {
            self.feedback = None;
        }

        match snap.phase {
            Phase::Playing => {
                if let Some(direction) = snap.current_direction {
                    draw_prompt(&self.stage, direction, self.feedback.map(|(v, _)| v));
                }
            }
            Phase::GameOver => {
                let secs = self.session.play_duration_seconds(now).unwrap_or(0.0) as u64;
                self.stage.summary.set_inner_html(&format!(
                    "<p>Final score <b>{}</b></p><p>Level reached <b>{}</b></p><p>Best streak <b>{}</b></p><p>Play time {}m {}s</p>",
                    group_thousands(snap.score),
                    snap.level,
                    snap.best_streak,
                    secs / 60,
                    secs % 60
                ));
            }
            Phase::Menu => {}
        }
    }
}

/// Frame-side timeout poll. An expired arrow reads as a miss, flagged as
/// game over when it took the last life.
fn poll_timeout(session: &mut GameSession, now: f64) -> Option<Verdict> {
    if !session.check_timeout(now) {
        return None;
    }
    Some(Verdict::Incorrect {
        game_over: session.phase() == Phase::GameOver,
    })
}

fn build_stage(doc: &Document) -> Result<Stage, JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let root = make_element(
        doc,
        "div",
        "ar-root",
        "max-width:640px; margin:24px auto; font-family:'Fira Code', monospace; color:#222; text-align:center;",
        &body,
    )?;
    let title = make_element(doc, "h1", "ar-title", "margin:8px 0 16px;", &root)?;
    title.set_text_content(Some("🎮 Arrow Rush"));

    let hud = make_element(
        doc,
        "div",
        "ar-hud",
        "display:flex; justify-content:space-around; padding:6px 10px; background:rgba(0,0,0,0.06); border-radius:8px; font-size:18px;",
        &root,
    )?;
    let score = make_element(doc, "span", "ar-score", "", &hud)?;
    let level = make_element(doc, "span", "ar-level", "", &hud)?;
    let lives = make_element(doc, "span", "ar-lives", "", &hud)?;
    let timer = make_element(doc, "span", "ar-timer", "min-width:4em;", &hud)?;

    // Menu
    let menu = make_element(doc, "div", "ar-menu", "", &root)?;
    let help = make_element(doc, "div", "ar-help", "text-align:left; margin:16px auto; max-width:480px;", &menu)?;
    help.set_inner_html(MENU_HELP);
    let start = make_button(doc, "ar-start", "🎮 Start game", &menu)?;
    on_click(&start, || navigate(|s, now| s.start_game(now)))?;

    // Playing
    let playing = make_element(doc, "div", "ar-playing", "", &root)?;
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_id("ar-canvas");
    canvas.set_width(480);
    canvas.set_height(360);
    canvas.set_attribute("style", "margin:16px auto; display:block; border-radius:20px;")?;
    playing.append_child(&canvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let controls = make_element(doc, "div", "ar-controls", "display:flex; gap:12px; justify-content:center;", &playing)?;
    let pause = make_button(doc, "ar-pause", "⏸️ Pause", &controls)?;
    on_click(&pause, || navigate(|s, _| s.pause()))?;
    let restart = make_button(doc, "ar-restart", "🔄 Restart", &controls)?;
    on_click(&restart, || navigate(|s, now| s.restart(now)))?;

    // Game over
    let game_over = make_element(doc, "div", "ar-game-over", "", &root)?;
    let banner = make_element(
        doc,
        "div",
        "ar-banner",
        "padding:32px; margin:16px 0; background:#FF6B6B; color:#fff; border-radius:20px; font-size:40px;",
        &game_over,
    )?;
    banner.set_text_content(Some("Game over"));
    let summary = make_element(doc, "div", "ar-summary", "font-size:18px;", &game_over)?;
    let again = make_button(doc, "ar-again", "🔄 Play again", &game_over)?;
    on_click(&again, || navigate(|s, now| s.restart(now)))?;
    let home = make_button(doc, "ar-home", "🏠 Main menu", &game_over)?;
    on_click(&home, || navigate(|s, _| s.return_to_menu()))?;

    Ok(Stage {
        canvas,
        ctx,
        score,
        level,
        lives,
        timer,
        menu,
        playing,
        game_over,
        summary,
    })
}

fn navigate(action: fn(&mut GameSession, f64)) {
    let now = now_ms();
    with_shell(|shell| {
        action(&mut shell.session, now);
        shell.feedback = None;
        shell.render(now);
    });
}

pub(crate) fn make_element(
    doc: &Document,
    tag: &str,
    id: &str,
    style: &str,
    parent: &HtmlElement,
) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element(tag)?.dyn_into()?;
    el.set_id(id);
    if !style.is_empty() {
        el.set_attribute("style", style)?;
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn make_button(doc: &Document, id: &str, text: &str, parent: &HtmlElement) -> Result<HtmlElement, JsValue> {
    let button = make_element(
        doc,
        "button",
        id,
        "margin:8px; padding:10px 22px; font-size:18px; border-radius:8px; border:1px solid #888; cursor:pointer;",
        parent,
    )?;
    button.set_text_content(Some(text));
    Ok(button)
}

pub(crate) fn on_click(el: &HtmlElement, mut action: impl FnMut() + 'static) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| action()) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn set_visible(el: &HtmlElement, visible: bool) {
    if let Err(err) = el
        .style()
        .set_property("display", if visible { "block" } else { "none" })
    {
        log::warn!("could not toggle #{}: {:?}", el.id(), err);
    }
}

fn hearts_html(lives: u8, max: u8) -> String {
    let mut html = String::new();
    for i in 0..max {
        if i < lives {
            html.push_str("<span style='color:#ff4d4d;margin-right:4px;'>♥</span>");
        } else {
            html.push_str("<span style='color:#6b6b6b;margin-right:4px;'>♡</span>");
        }
    }
    html
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn draw_prompt(stage: &Stage, direction: Direction, feedback: Option<Verdict>) {
    let ctx = &stage.ctx;
    let w = stage.canvas.width() as f64;
    let h = stage.canvas.height() as f64;

    ctx.set_fill_style_str(direction.color());
    ctx.fill_rect(0.0, 0.0, w, h);

    match feedback {
        Some(Verdict::Correct { .. }) => {
            ctx.set_fill_style_str("rgba(80,220,120,0.35)");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        Some(Verdict::Incorrect { .. }) => {
            ctx.set_fill_style_str("rgba(40,0,0,0.35)");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        _ => {}
    }

    ctx.set_shadow_color("rgba(0,0,0,0.5)");
    ctx.set_shadow_blur(6.0);
    ctx.set_shadow_offset_x(3.0);
    ctx.set_shadow_offset_y(3.0);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("180px sans-serif");
    ctx.fill_text(direction.glyph(), w / 2.0, h * 0.42).ok();
    ctx.set_font("22px 'Fira Code', monospace");
    ctx.fill_text(&format!("Press the {}!", direction.label()), w / 2.0, h * 0.85)
        .ok();
    ctx.set_shadow_color("rgba(0,0,0,0)");
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        if let Err(err) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("frame loop stopped: {:?}", err);
        }
    }
}

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    // Input handlers stamp with `now_ms()`; the frame uses the same clock
    // rather than the callback timestamp so elapsed times never go negative.
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let now = now_ms();
        with_shell(|shell| shell.tick(now));
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn timeout_feedback_reports_game_over() {
        let mut session = GameSession::with_seed(5);
        session.start_game(0.0);
        assert_eq!(poll_timeout(&mut session, 3_000.0), None);
        assert_eq!(
            poll_timeout(&mut session, 3_001.0),
            Some(Verdict::Incorrect { game_over: false })
        );
        assert_eq!(
            poll_timeout(&mut session, 6_002.0),
            Some(Verdict::Incorrect { game_over: false })
        );
        assert_eq!(
            poll_timeout(&mut session, 9_003.0),
            Some(Verdict::Incorrect { game_over: true })
        );
        assert_eq!(poll_timeout(&mut session, 20_000.0), None);
    }

    #[test]
    fn hearts_show_spent_lives() {
        let html = hearts_html(1, 3);
        assert_eq!(html.matches('♥').count(), 1);
        assert_eq!(html.matches('♡').count(), 2);
    }

    #[test]
    fn configure_rejects_bad_rules() {
        let rules = Rules {
            base_points: 0,
            ..Rules::default()
        };
        assert!(matches!(configure(rules), Err(RulesError::ZeroPoints)));
        assert_eq!(RULES.with(|r| r.get()), Rules::default());
    }
}
