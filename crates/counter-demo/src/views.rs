//! Counter demo views
//!
//! The header reads the count through a selector; the counter panel is a
//! connected render function receiving `num` plus the bound creators.

use crate::actions::{self, CounterAction};
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;
use tiny_redux::{
    bind_action_creators, connect, Connected, Connector, Dispatch, MapDispatch, Props,
};

pub type CounterProps = Props<AppState, CounterAction>;

/// Header showing the raw count
pub fn header(count: i64) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("tiny-redux counter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  (count = {})", count)),
    ]))
    .block(Block::default().borders(Borders::ALL))
}

/// State and dispatch projections of the counter panel
///
/// State props: `num`. Dispatch props: `dispatch`, `add`, `reset`, bound
/// with the step found in the own props.
pub fn counter_connector() -> Connector<AppState, CounterAction> {
    connect(
        |state: &AppState, _own: &CounterProps| Props::new().with_value("num", state.count),
        MapDispatch::function(|dispatch: &Dispatch<AppState, CounterAction>, own: &CounterProps| {
            let step = own.value("step").and_then(Value::as_i64).unwrap_or(1);
            bind_action_creators(&actions::creators(step), dispatch).into()
        }),
    )
}

/// Counter panel connected to the store
pub fn counter_panel() -> Connected<AppState, CounterAction, Paragraph<'static>> {
    counter_connector().wrap(render_counter_panel)
}

fn render_counter_panel(props: &CounterProps) -> Paragraph<'static> {
    let num = props.value("num").and_then(Value::as_i64).unwrap_or_default();
    let title = props
        .value("title")
        .and_then(Value::as_str)
        .unwrap_or("Counter")
        .to_string();
    let mut bound: Vec<&str> = props
        .keys()
        .filter(|key| props.callback(key).is_some())
        .collect();
    bound.sort_unstable();

    let color = if num < 0 { Color::Red } else { Color::Green };
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}", num),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("creators: {}", bound.join(", "))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(title))
}

fn help() -> Paragraph<'static> {
    Paragraph::new("+/- count   d delayed -   a add   r reset   q quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Lay out and draw all views
pub fn render(frame: &mut Frame, header: Paragraph<'static>, panel: Paragraph<'static>) {
    let [top, middle, bottom]: [Rect; 3] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    frame.render_widget(header, top);
    frame.render_widget(panel, middle);
    frame.render_widget(help(), bottom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::counter_reducer;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::Cell;
    use std::rc::Rc;
    use tiny_redux::create_store;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_counter_panel_renders_count_and_creators() {
        let store = create_store(counter_reducer(41)).unwrap();
        let panel = counter_panel().mount(&store, || {});
        store.dispatch(CounterAction::Increment).unwrap();

        let own = Props::new().with_value("title", "Demo").with_value("step", 2);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                render(frame, header(store.get_state().count), panel.render(&own))
            })
            .unwrap();

        let screen = screen(&terminal);
        assert!(screen.contains("42"));
        assert!(screen.contains("Demo"));
        assert!(screen.contains("creators: add, reset"));
    }

    #[test]
    fn test_panel_add_uses_step_from_own_props() {
        let store = create_store(counter_reducer(0)).unwrap();
        let props = CounterProps::new().with_value("step", 4);
        let panel = counter_connector()
            .wrap(|props: &CounterProps| props.callback("add").map(|add| add.call(&[])));
        let instance = panel.mount(&store, || {});

        assert!(matches!(instance.render(&props), Some(Ok(_))));
        assert_eq!(store.get_state().count, 4);

        assert!(matches!(instance.render(&CounterProps::new()), Some(Ok(_))));
        assert_eq!(store.get_state().count, 5);
    }

    #[test]
    fn test_counter_panel_follows_store_updates() {
        let store = create_store(counter_reducer(0)).unwrap();
        let renders = Rc::new(Cell::new(0));
        let observed = Rc::clone(&renders);
        let panel = counter_panel().mount(&store, move || observed.set(observed.get() + 1));

        store.dispatch(CounterAction::Add(7)).unwrap();
        assert_eq!(renders.get(), 1);

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(panel.render(&CounterProps::new()), frame.area()))
            .unwrap();
        assert!(screen(&terminal).contains('7'));
    }
}
