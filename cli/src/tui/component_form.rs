// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData, rc::Rc};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::util::{
    byte_index_of_grapheme, byte_range_of_grapheme_at, grapheme_count, unicode_width_of_slice,
};

pub struct Form<S, C: FormItem<S>> {
    items: Vec<C>,
    item_index: usize,
    _phantom: PhantomData<S>,
}

impl<S, C: FormItem<S>> Form<S, C> {
    pub fn new(items: Vec<C>) -> Self {
        Self {
            items,
            item_index: 0,
            _phantom: PhantomData,
        }
    }

    fn layout(&self, store: &RefCell<S>) -> Layout {
        Layout::vertical(
            self.items
                .iter()
                .map(|item| Constraint::Max(item.item_height(store) + 2)), // title + spacer
        )
        .margin(1)
    }

    fn navigate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>, offset: isize) {
        if let Some(a) = self.items.get_mut(self.item_index) {
            a.deactivate(dispatcher, store);
        }

        let len = self.items.len() as isize;
        if len > 0 {
            self.item_index = (self.item_index as isize + offset).rem_euclid(len) as usize;
        }

        if let Some(a) = self.items.get_mut(self.item_index) {
            a.activate(dispatcher, store);
        }
    }
}

impl<S, C: FormItem<S>> Component<S> for Form<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let areas = self.layout(store).split(area);
        let last = self.items.len().saturating_sub(1);
        for (i, (item, area)) in self.items.iter().zip(areas.iter()).enumerate() {
            item_render(i == last, item, store, *area, buf);
            item.render(store, item_inner(*area), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.items
            .iter()
            .zip(self.layout(store).split(area).iter())
            .take(self.item_index + 1)
            .last()
            .and_then(|(comp, area)| comp.get_cursor_position(store, *area))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let areas = self.layout(store).split(area);
        if let Some((comp, subarea)) = self
            .items
            .iter_mut()
            .zip(areas.iter())
            .take(self.item_index + 1)
            .last()
            && let Some(msg) = comp.on_key(dispatcher, store, *subarea, event)
        {
            return Some(msg);
        };

        match event.code {
            KeyCode::Up | KeyCode::BackTab if self.item_index > 0 => {
                self.navigate(dispatcher, store, -1);
                Some(Message::CursorUpdated)
            }
            KeyCode::Down | KeyCode::Tab if self.item_index + 1 < self.items.len() => {
                self.navigate(dispatcher, store, 1);
                Some(Message::CursorUpdated)
            }
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.activate(dispatcher, store);
        }
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        if let Some(item) = self.items.get_mut(self.item_index) {
            item.deactivate(dispatcher, store);
        }
    }
}

pub trait FormItem<S>: Component<S> {
    fn item_title(&self, store: &RefCell<S>) -> &str;
    fn item_state(&self, store: &RefCell<S>) -> FormItemState;

    /// Rows of content below the title.
    fn item_height(&self, _store: &RefCell<S>) -> u16 {
        1
    }
}

impl<S> Component<S> for Box<dyn FormItem<S>> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        (**self).render(store, area, buf)
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        (**self).get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        (**self).on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).activate(dispatcher, store)
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        (**self).deactivate(dispatcher, store)
    }
}

impl<S> FormItem<S> for Box<dyn FormItem<S>> {
    fn item_title(&self, store: &RefCell<S>) -> &str {
        (**self).item_title(store)
    }

    fn item_state(&self, store: &RefCell<S>) -> FormItemState {
        (**self).item_state(store)
    }

    fn item_height(&self, store: &RefCell<S>) -> u16 {
        (**self).item_height(store)
    }
}

pub enum FormItemState {
    /// Focused.
    Active,

    Inactive,
}

/// Reads a value from the store and turns edits into actions.
pub trait Access<S, T: ToOwned> {
    fn get(store: &RefCell<S>) -> T;
    fn set(dispatcher: &mut Dispatcher, value: T) -> bool;

    /// Called once editing is done, when the field loses focus.
    fn commit(_dispatcher: &mut Dispatcher) {}
}

#[derive(Debug)]
pub struct Input<S, A: Access<S, String>> {
    title: String,
    active: bool,
    /// Cursor position in grapheme clusters.
    character_index: usize,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: Access<S, String>> Input<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            character_index: 0,
            _phantom_a: PhantomData,
            _phantom_s: PhantomData,
        }
    }
}

impl<S, A: Access<S, String>> Component<S> for Input<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Paragraph::new(v.as_str()).render(area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let width = unicode_width_of_slice(v.as_str(), self.character_index);
        let x = area.x + (width as u16) + 2; // border 1 + padding 1
        let y = area.y + 1; // title line: 1
        Some((x, y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;
        if !self.active
            || !matches!(
                event.code,
                Left | Right | Home | End | Backspace | Delete | Char(_)
            )
            || event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return None;
        }

        // the value may have changed under us, e.g. by a clear action
        let mut v = A::get(store);
        let count = grapheme_count(&v);
        self.character_index = self.character_index.min(count);

        match event.code {
            Left if self.character_index > 0 => self.character_index -= 1,
            Right if self.character_index < count => self.character_index += 1,
            Home => self.character_index = 0,
            End => self.character_index = count,
            Backspace if self.character_index > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index - 1) {
                    v.replace_range(range, "");
                    if A::set(dispatcher, v) {
                        self.character_index -= 1;
                    }
                }
            }
            Delete if self.character_index < count => {
                if let Some(range) = byte_range_of_grapheme_at(&v, self.character_index) {
                    v.replace_range(range, "");
                    A::set(dispatcher, v);
                }
            }
            Char(c) => {
                v.insert(byte_index_of_grapheme(&v, self.character_index), c);
                let count = grapheme_count(&v);
                if A::set(dispatcher, v) {
                    // a combining mark joins the previous cluster
                    self.character_index = (self.character_index + 1).min(count);
                }
            }
            _ => {}
        };

        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        self.character_index = grapheme_count(&A::get(store));
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, _store: &RefCell<S>) {
        if self.active {
            A::commit(dispatcher);
        }
        self.active = false;
        self.character_index = 0;
    }
}

impl<S, A: Access<S, String>> FormItem<S> for Input<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }
}

#[derive(Debug)]
pub struct RadioGroup<S, T: Eq + Clone, A: Access<S, T>> {
    title: String,
    values: Vec<T>,
    options: Vec<String>,
    active: bool,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, T: Eq + Clone, A: Access<S, T>> RadioGroup<S, T, A> {
    pub fn new(title: impl ToString, values: Vec<T>, options: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            values,
            options,
            active: false,
            _phantom_s: PhantomData,
            _phantom_a: PhantomData,
        }
    }

    fn selected(&self, store: &RefCell<S>) -> usize {
        let v = A::get(store);
        self.values.iter().position(|s| s == &v).unwrap_or(0)
    }

    fn split(&self, area: Rect) -> Rc<[Rect]> {
        self.layout().split(area)
    }

    fn layout(&self) -> Layout {
        let constraints = self
            .options
            .iter()
            // 6 = border left (1) + active marker [ ] (3) + space (1) + border right (1)
            .map(|s| Constraint::Min(6 + s.width() as u16));

        Layout::horizontal(constraints)
    }
}

impl<S, T: Eq + Clone, A: Access<S, T>> Component<S> for RadioGroup<S, T, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let options = self.split(area);
        let selected = self.selected(store);
        for (i, (value, area)) in self.options.iter().zip(options.iter()).enumerate() {
            let icon = if selected == i { 'x' } else { ' ' };
            let label = format!("[{icon}] {value}");
            Paragraph::new(label).render(*area, buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        self.split(item_inner(area))
            .get(self.selected(store))
            .map(|area| (area.x + 1, area.y))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active || self.values.is_empty() {
            return None;
        }

        let offset = match event.code {
            KeyCode::Left => self.values.len() - 1,
            KeyCode::Right => 1,
            _ => return None,
        };
        let index = (self.selected(store) + offset) % self.values.len();
        match self.values.get(index) {
            Some(a) => {
                A::set(dispatcher, a.to_owned());
                Some(Message::CursorUpdated)
            }
            None => Some(Message::Handled),
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, T: Eq + Clone, A: Access<S, T>> FormItem<S> for RadioGroup<S, T, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }
}

/// Options of a single-choice toggle group, where choosing the chosen option
/// again clears the choice.
pub trait PaletteAccess<S> {
    fn options(store: &RefCell<S>) -> Vec<String>;
    fn selected(store: &RefCell<S>) -> Option<String>;
    fn toggle(dispatcher: &mut Dispatcher, value: String);
    fn swatch(option: &str) -> Span<'static>;
}

const PALETTE_PER_ROW: usize = 8;
const PALETTE_CELL_WIDTH: u16 = 5; // [ + swatch (2) + ] + gap

pub struct TogglePalette<S, A: PaletteAccess<S>> {
    title: String,
    active: bool,
    focus: usize,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: PaletteAccess<S>> TogglePalette<S, A> {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            active: false,
            focus: 0,
            _phantom_s: PhantomData,
            _phantom_a: PhantomData,
        }
    }

    fn cell_line(option: &str, selected: bool) -> Vec<Span<'static>> {
        let swatch = A::swatch(option);
        let pad = 2usize.saturating_sub(swatch.width());
        let (open, close) = if selected { ("[", "]") } else { (" ", " ") };
        vec![
            Span::raw(open).bold(),
            swatch,
            Span::raw(" ".repeat(pad)),
            Span::raw(close).bold(),
            Span::raw(" "),
        ]
    }
}

impl<S, A: PaletteAccess<S>> Component<S> for TogglePalette<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let options = A::options(store);
        let selected = A::selected(store);
        for (row, chunk) in options.chunks(PALETTE_PER_ROW).enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }

            let spans: Vec<_> = chunk
                .iter()
                .flat_map(|o| Self::cell_line(o, selected.as_deref() == Some(o.as_str())))
                .collect();
            Line::from(spans).render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        if !self.active {
            return None;
        }

        let focus = self.focus.min(A::options(store).len().saturating_sub(1));
        let inner = item_inner(area);
        let col = (focus % PALETTE_PER_ROW) as u16;
        let row = (focus / PALETTE_PER_ROW) as u16;
        Some((inner.x + col * PALETTE_CELL_WIDTH + 1, inner.y + row))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let options = A::options(store);
        if options.is_empty() {
            return None;
        }
        self.focus = self.focus.min(options.len() - 1);

        match event.code {
            KeyCode::Left => {
                self.focus = (self.focus + options.len() - 1) % options.len();
                Some(Message::CursorUpdated)
            }
            KeyCode::Right => {
                self.focus = (self.focus + 1) % options.len();
                Some(Message::CursorUpdated)
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let value = options[self.focus].clone();
                A::toggle(dispatcher, value);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, store: &RefCell<S>) {
        self.active = true;
        // start on the chosen option, if any
        let options = A::options(store);
        self.focus = A::selected(store)
            .and_then(|s| options.iter().position(|o| *o == s))
            .unwrap_or(0);
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: PaletteAccess<S>> FormItem<S> for TogglePalette<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }

    fn item_height(&self, store: &RefCell<S>) -> u16 {
        A::options(store).len().div_ceil(PALETTE_PER_ROW).max(1) as u16
    }
}

/// A number changed with the left and right keys.
pub struct Stepper<S, A: Access<S, i32>> {
    title: String,
    min: i32,
    active: bool,
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
}

impl<S, A: Access<S, i32>> Stepper<S, A> {
    pub fn new(title: impl ToString, min: i32) -> Self {
        Self {
            title: title.to_string(),
            min,
            active: false,
            _phantom_s: PhantomData,
            _phantom_a: PhantomData,
        }
    }
}

impl<S, A: Access<S, i32>> Component<S> for Stepper<S, A> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let v = A::get(store);
        Line::from(vec![
            "◀ ".dark_gray(),
            Span::raw(v.to_string()).bold(),
            " ▶".dark_gray(),
        ])
        .render(area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.active.then(|| {
            let inner = item_inner(area);
            (inner.x + 2, inner.y)
        })
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        if !self.active {
            return None;
        }

        let v = A::get(store);
        let next = match event.code {
            KeyCode::Left => v.saturating_sub(1),
            KeyCode::Right => v.saturating_add(1),
            _ => return None,
        };
        if next >= self.min {
            A::set(dispatcher, next);
        }
        Some(Message::CursorUpdated)
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S, A: Access<S, i32>> FormItem<S> for Stepper<S, A> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }
}

/// Dispatches an action when pressed with enter or space.
pub struct Button<S> {
    title: String,
    label: String,
    action: Action,
    active: bool,
    _phantom: PhantomData<S>,
}

impl<S> Button<S> {
    pub fn new(title: impl ToString, label: impl ToString, action: Action) -> Self {
        Self {
            title: title.to_string(),
            label: label.to_string(),
            action,
            active: false,
            _phantom: PhantomData,
        }
    }
}

impl<S> Component<S> for Button<S> {
    fn render(&self, _store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let label = format!("[ {} ]", self.label);
        let line = if self.active {
            Line::from(label.blue().bold())
        } else {
            Line::from(label)
        };
        line.render(area, buf);
    }

    fn get_cursor_position(&self, _store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.active.then(|| {
            let inner = item_inner(area);
            (inner.x + 2, inner.y)
        })
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &RefCell<S>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        match event.code {
            KeyCode::Enter | KeyCode::Char(' ') if self.active => {
                dispatcher.dispatch(self.action.clone());
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = true;
    }

    fn deactivate(&mut self, _: &mut Dispatcher, _store: &RefCell<S>) {
        self.active = false;
    }
}

impl<S> FormItem<S> for Button<S> {
    fn item_title(&self, _store: &RefCell<S>) -> &str {
        &self.title
    }

    fn item_state(&self, _store: &RefCell<S>) -> FormItemState {
        active_state(self.active)
    }
}

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";

const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

fn active_state(active: bool) -> FormItemState {
    if active {
        FormItemState::Active
    } else {
        FormItemState::Inactive
    }
}

fn item_render<S>(
    is_last: bool,
    item: &impl FormItem<S>,
    store: &RefCell<S>,
    area: Rect,
    buf: &mut Buffer,
) {
    let (color, symbol) = match item.item_state(store) {
        FormItemState::Active => (Color::Blue, S_STEP_ACTIVE),
        FormItemState::Inactive => (Color::Gray, S_STEP_INACTIVE),
    };

    let area_title = Rect::new(area.x + 2, area.y, area.width.saturating_sub(2), 1);
    Clear.render(area_title, buf);
    Paragraph::new(item.item_title(store))
        .bold()
        .fg(color)
        .render(area_title, buf);

    if let Some(c) = buf.cell_mut((area.x, area.y)) {
        c.set_symbol(symbol);
        c.set_fg(color);
    }

    for y in 1..area.height.saturating_sub(1) {
        if let Some(c) = buf.cell_mut((area.x, area.y + y)) {
            c.set_symbol(S_SIDER_CONNECTOR);
            c.set_fg(color);
        }
    }

    if let Some(c) = buf.cell_mut((area.x, area.y + area.height.saturating_sub(1))) {
        let symbol = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        c.set_symbol(symbol);
        c.set_fg(color);
    }
}

fn item_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
