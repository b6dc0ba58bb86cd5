use crate::catalog::ProductSource;
use crate::routing::Navigator;
use crate::runtime::event::AppEvent;
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::storefront::Storefront;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::Renderer;
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

const IDLE_POLL: Duration = Duration::from_millis(120);

/// Drives a [`Storefront`] from a real terminal.
pub struct Runtime<S, N> {
    storefront: Storefront<S, N>,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl<S: ProductSource, N: Navigator> Runtime<S, N> {
    pub fn new(storefront: Storefront<S, N>, terminal: Terminal) -> Self {
        Self {
            storefront,
            terminal,
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
        }
    }

    pub fn run(mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.storefront.state().should_exit() {
                self.storefront.advance(Instant::now());
                self.render_if_requested()?;

                let timeout = self.storefront.poll_timeout(Instant::now(), IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;
                self.handle_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        let scheduler = self.storefront.shutdown();
        info!(pending = !scheduler.is_idle(), "storefront closed");
        run_result.and(exit_result)
    }

    fn handle_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        let now = Instant::now();
        match event {
            TerminalEvent::Key(key) => {
                let intent = self.key_bindings.resolve(key);
                if intent != Intent::Noop {
                    self.storefront.dispatch(AppEvent::Intent(intent), now);
                }
            }
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()?;
            }
            TerminalEvent::Scroll(delta) => {
                self.storefront.intent(Intent::Scroll(delta as isize), now);
            }
            TerminalEvent::Tick => self.storefront.advance(now),
        }
        self.render_if_requested()
    }

    fn render_if_requested(&mut self) -> io::Result<()> {
        if self.storefront.take_render_request() {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self
            .renderer
            .render(self.storefront.state(), self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}
