use super::app::{App, Screen};
use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        super::modal::handle_modal_key(app, key);
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    match app.screen {
        Screen::Businesses => handle_businesses_key(app, key),
        Screen::Workspace => handle_workspace_key(app, key),
    }
}

fn handle_businesses_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('m') => app.load_more(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('p') => app.toggle_pin(),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_workspace_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Esc => app.back(),
        KeyCode::Tab => app.switch_tab(true),
        KeyCode::BackTab => app.switch_tab(false),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Enter if app.tab() == Some(crate::console::WorkspaceTab::Danger) => {
            app.open_danger()
        }
        KeyCode::Enter => app.edit_field(),
        KeyCode::Char('s') => app.save_current(),
        KeyCode::Char('d') => app.open_danger(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('m') => app.load_more(),
        KeyCode::Char('p') => app.toggle_pin(),
        _ => {}
    }
}
