//! End-to-end desk sessions against an in-memory page.

use std::collections::HashMap;
use std::time::Duration;

use notedesk_core::event::{KeyCode, KeyEvent};
use notedesk_core::geometry::{Point, Rect};
use notedesk_layout::{CardId, FunFactNote, LayoutMode, Tab};
use notedesk_runtime::{
    ContainerMetrics, Desk, DeskConfig, DeskHost, HostCommand, MenuState, Scroller, SettleGiveUp,
    SettleOutcome,
};
use proptest::prelude::*;

/// A page that applies host commands the way the browser would.
#[derive(Debug, Default)]
struct Page {
    positions: HashMap<CardId, Point>,
    heights: HashMap<CardId, f64>,
    z: HashMap<CardId, u32>,
    container_height: f64,
    window_scroll_y: f64,
    wiggles: Vec<CardId>,
    user_select: bool,
    subscriptions: usize,
    menu: (bool, bool),
    notes: Vec<FunFactNote>,
}

impl Page {
    fn apply(&mut self, commands: Vec<HostCommand>) {
        for cmd in commands {
            match cmd {
                HostCommand::RebuildCards { .. } => self.positions.clear(),
                HostCommand::PlaceFunFacts { notes } => self.notes = notes,
                HostCommand::SetPosition { card, position } => {
                    self.positions.insert(card, position);
                }
                HostCommand::SetZIndex { card, z } => {
                    self.z.insert(card, z);
                }
                HostCommand::SetUserSelect { enabled } => self.user_select = enabled,
                HostCommand::SubscribeDocument { .. } => self.subscriptions += 1,
                HostCommand::UnsubscribeDocument { .. } => self.subscriptions -= 1,
                HostCommand::ScrollTo { top, smooth, .. } => {
                    assert!(smooth);
                    self.window_scroll_y = top;
                }
                HostCommand::RestartWiggle { card } => self.wiggles.push(card),
                HostCommand::SetContainerHeight { height } => self.container_height = height,
                HostCommand::SetMenu { mounted, open } => self.menu = (mounted, open),
                _ => {}
            }
        }
    }
}

impl DeskHost for Page {
    fn card_rect(&self, card: CardId) -> Option<Rect> {
        let p = self.positions.get(&card)?;
        let h = self.heights.get(&card).copied().unwrap_or(320.0);
        Some(Rect::new(p.x, p.y - self.window_scroll_y, 400.0, h))
    }

    fn container(&self) -> Option<ContainerMetrics> {
        Some(ContainerMetrics {
            rect: Rect::new(0.0, -self.window_scroll_y, 1440.0, self.container_height),
            scroll_top: 0.0,
            scroll_height: self.container_height,
            client_height: self.container_height,
        })
    }

    fn window_scroll_y(&self) -> f64 {
        self.window_scroll_y
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn run(desk: &mut Desk, page: &mut Page) {
    page.apply(desk.take_commands());
}

#[test]
fn wide_session_drag_navigate_and_resize() {
    let mut desk = Desk::with_seed(DeskConfig::default(), 1);
    let mut page = Page {
        user_select: true,
        ..Page::default()
    };
    desk.mount(1440.0);
    run(&mut desk, &mut page);
    assert_eq!(page.positions.len(), 8);

    desk.frame(ms(0), &page);
    run(&mut desk, &mut page);
    assert_eq!(page.container_height, (1250.0_f64 + 320.0 + 24.0).ceil());

    desk.dismiss_hint();
    desk.pointer_down(CardId::Projects, 1, Point::new(60.0, 920.0));
    run(&mut desk, &mut page);
    assert!(!page.user_select);
    assert_eq!(page.subscriptions, 1);
    assert_eq!(page.z.get(&CardId::Projects), Some(&2));

    desk.pointer_move(1, Point::new(70.0, 2920.0));
    desk.pointer_up(1);
    run(&mut desk, &mut page);
    assert!(page.user_select);
    assert_eq!(page.subscriptions, 0);
    assert_eq!(page.positions[&CardId::Projects], Point::new(52.0, 2912.0));

    desk.frame(ms(16), &page);
    run(&mut desk, &mut page);
    assert_eq!(page.container_height, 2912.0 + 320.0 + 24.0);

    desk.select_tab(Tab::Projects, &page);
    run(&mut desk, &mut page);
    assert_eq!(page.window_scroll_y, 2912.0 - 80.0);
    desk.frame(ms(32), &page);
    run(&mut desk, &mut page);
    assert_eq!(page.wiggles, vec![CardId::Projects]);

    desk.resize(1100.0);
    run(&mut desk, &mut page);
    assert_eq!(desk.mode(), LayoutMode::Medium);
    assert_eq!(page.positions[&CardId::Projects], Point::new(40.0, 1100.0));
}

#[test]
fn fun_fact_notes_follow_the_mode() {
    let mut desk = Desk::with_seed(DeskConfig::default(), 1);
    let mut page = Page::default();
    let note = |page: &Page, card: CardId| {
        page.notes
            .iter()
            .find(|n| n.card == card)
            .copied()
            .expect("card has a note")
    };

    desk.mount(1440.0);
    run(&mut desk, &mut page);
    assert_eq!(page.notes.len(), 8);
    let skills = note(&page, CardId::Skills);
    assert_eq!(skills.position, Point::new(970.0, 114.0));
    assert_eq!(skills.width, 408.0);

    desk.resize(1100.0);
    run(&mut desk, &mut page);
    assert_eq!(page.notes.len(), 8);
    let experience = note(&page, CardId::Experience);
    assert_eq!(experience.position, Point::new(438.0, 114.0));
    assert_eq!(experience.width, 336.0);
    assert!(page.notes.iter().all(|n| n.width == 336.0));

    desk.resize(390.0);
    run(&mut desk, &mut page);
    assert!(page.notes.is_empty());

    // Dragging moves the card, not its note.
    desk.resize(1440.0);
    run(&mut desk, &mut page);
    let before = page.notes.clone();
    desk.pointer_down(CardId::Skills, 1, Point::new(1000.0, 120.0));
    desk.pointer_move(1, Point::new(1100.0, 400.0));
    desk.pointer_up(1);
    run(&mut desk, &mut page);
    assert_eq!(page.notes, before);
}

#[test]
fn narrow_session_menu_and_navigation() {
    let mut desk = Desk::new(DeskConfig::default());
    let mut page = Page::default();
    page.heights.insert(CardId::Nav, 56.0);
    desk.mount(390.0);
    run(&mut desk, &mut page);
    page.positions.insert(CardId::Nav, Point::new(28.0, 8.0));
    assert!(!desk.hint_visible());

    desk.toggle_menu();
    desk.frame(ms(16), &page);
    run(&mut desk, &mut page);
    assert_eq!(page.menu, (true, true));

    desk.select_tab(Tab::Skills, &page);
    run(&mut desk, &mut page);
    assert_eq!(desk.active_tab(), Tab::Skills);
    assert_eq!(page.menu, (true, false));
    assert_eq!(page.window_scroll_y, 1660.0 - 72.0);
    assert!(!desk.settle_pending());

    desk.frame(ms(400), &page);
    run(&mut desk, &mut page);
    assert_eq!(desk.menu_state(), MenuState::Closed);
    assert_eq!(page.menu, (false, false));
    assert!(page.wiggles.is_empty());
}

#[test]
fn unreachable_target_gives_up_on_frame_limit() {
    let mut config = DeskConfig::default();
    config.scroll.settle_max_frames = 10;
    let mut desk = Desk::new(config);
    let mut page = Page::default();
    desk.mount(1440.0);
    run(&mut desk, &mut page);

    desk.select_tab(Tab::Leadership, &page);
    // The host never actually scrolls.
    desk.take_commands();
    for frame in 1..=10 {
        desk.frame(ms(frame * 16), &page);
    }
    assert_eq!(
        desk.last_settle_outcome(),
        Some(SettleOutcome::GaveUp(SettleGiveUp::FrameLimit))
    );
    assert!(!desk.settle_pending());
}

#[test]
fn escape_closes_menu_on_narrow() {
    let mut desk = Desk::new(DeskConfig::default());
    desk.mount(600.0);
    desk.open_menu();
    desk.frame(ms(16), &Page::default());
    desk.take_commands();
    desk.key(KeyEvent::new(KeyCode::Escape));
    assert_eq!(
        desk.take_commands(),
        vec![HostCommand::SetMenu {
            mounted: true,
            open: false
        }]
    );
    assert!(matches!(desk.menu_state(), MenuState::Closing { .. }));
}

#[test]
fn scroll_command_targets_window_without_overflow() {
    let mut desk = Desk::new(DeskConfig::default());
    let mut page = Page::default();
    desk.mount(1440.0);
    run(&mut desk, &mut page);
    desk.select_tab(Tab::Education, &page);
    let cmds = desk.take_commands();
    assert!(cmds.contains(&HostCommand::ScrollTo {
        scroller: Scroller::Window,
        top: 540.0 - 80.0,
        smooth: true,
    }));
}

proptest! {
    #[test]
    fn z_indices_strictly_increase_across_cards(
        picks in proptest::collection::vec(0usize..8, 1..40),
    ) {
        let mut desk = Desk::with_seed(DeskConfig::default(), 3);
        let mut page = Page::default();
        desk.mount(1440.0);
        run(&mut desk, &mut page);

        let mut last = 1;
        for (i, pick) in picks.into_iter().enumerate() {
            let card = CardId::PLACED[pick];
            let id = i as u32 + 1;
            desk.pointer_down(card, id, Point::ZERO);
            desk.pointer_up(id);
            run(&mut desk, &mut page);
            let z = page.z[&card];
            prop_assert!(z > last);
            last = z;
        }
    }

    #[test]
    fn released_cards_rest_on_the_grid(dx in -600.0f64..600.0, dy in -600.0f64..1200.0) {
        let mut desk = Desk::with_seed(DeskConfig::default(), 9);
        desk.mount(1280.0);
        desk.pointer_down(CardId::Skills, 1, Point::ZERO);
        desk.pointer_move(1, Point::new(dx, dy));
        desk.pointer_up(1);
        let p = desk.card(CardId::Skills).map(|c| c.position()).unwrap_or(Point::ZERO);
        prop_assert_eq!(p.x % 26.0, 0.0);
        prop_assert_eq!(p.y % 26.0, 0.0);
    }
}
