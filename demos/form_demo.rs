//! Form Demo: two inputs and a live clock composed under one parent.
//!
//! Demonstrates:
//! - Identity routing of key events to the focused input
//! - Focus transfer with Tab / Shift+Tab, refused while a field is invalid
//! - A ticking child whose commands are nested under its identity
//! - Submitting through an ordered sequence of commands
//!
//! Run with `RUST_LOG=bramble=debug` to see the program's log on stderr.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use bramble::{
    batch, focus_next, focus_prev, init_nested, nest, quit, route_nested, sequence, tick,
    update_nested_model, update_tick_model, Cmd, Command, FocusModel, IdModel, Identity, Input,
    Model, Msg, NestedModel, NestedMsg, Program, ProgramConfig, Text, TickModel, ValidationError,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Attribute, Color, ContentStyle};
use crossterm::{cursor, execute, terminal};
use tracing_subscriber::EnvFilter;

/// Seconds since start, refreshed on every tick.
struct Clock {
    id: Identity,
    started: Instant,
    label: Text,
}

impl Model for Clock {
    fn init(&mut self) -> Cmd {
        self.label.init();
        tick(self)
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        if let Msg::Tick(at) = &msg {
            let elapsed = at.instant().duration_since(self.started);
            self.label.set_content(format!("uptime {:.1}s", elapsed.as_secs_f32()));
        }
        update_tick_model(self, &msg)
    }

    fn view(&self) -> String {
        self.label.view()
    }
}

impl IdModel for Clock {
    fn id(&self) -> Identity {
        self.id
    }
}

impl TickModel for Clock {
    fn frame_duration(&self) -> Duration {
        Duration::from_millis(100)
    }
}

struct Saved(String);

struct Form {
    fields: Vec<Input>,
    clock: Clock,
    status: Text,
}

impl Form {
    fn new() -> Self {
        let mut invalid = ContentStyle::new();
        invalid.foreground_color = Some(Color::Red);
        let mut valid = ContentStyle::new();
        valid.attributes.set(Attribute::Bold);

        let mut name = Input::new().with_prompts("  Name: ", "> Name: ");
        name.enable_suggestions(true);
        name.set_suggestions(vec!["Ada Lovelace".into(), "Alan Turing".into(), "Grace Hopper".into()]);

        let port = Input::new()
            .with_prompts("  Port: ", "> Port: ")
            .with_styles(ContentStyle::new(), valid, invalid)
            .with_validator(|value| match value.parse::<u16>() {
                Ok(_) => Ok(()),
                Err(err) => Err(ValidationError::new(err.to_string())),
            });

        let mut fields = vec![name, port];
        for field in &mut fields {
            field.set_width(40);
        }
        Self {
            fields,
            clock: Clock {
                id: Identity::new(),
                started: Instant::now(),
                label: Text::new("uptime 0.0s"),
            },
            status: Text::new("Tab: next field, Enter: save, Esc: quit"),
        }
    }

    fn save(&self) -> Cmd {
        let summary = self
            .fields
            .iter()
            .map(Input::value)
            .collect::<Vec<_>>()
            .join(" @ ");
        sequence([
            Some(Command::new(|| {
                thread::sleep(Duration::from_millis(300));
                Msg::new(Saved(String::from("saving...")))
            })),
            Some(Command::new(move || Msg::new(Saved(format!("saved {summary}"))))),
        ])
    }
}

impl Model for Form {
    fn init(&mut self) -> Cmd {
        let children = init_nested(self);
        batch([children, focus_next(&mut self.fields)])
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        if matches!(msg, Msg::Nested(_)) {
            return update_nested_model(self, msg);
        }
        if let Some(Event::Key(key)) = msg.downcast_ref::<Event>() {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            match key.code {
                KeyCode::Esc => return quit(),
                KeyCode::Tab => return focus_next(&mut self.fields),
                KeyCode::BackTab => return focus_prev(&mut self.fields),
                KeyCode::Enter => return self.save(),
                _ => {}
            }
        }
        if let Some(Saved(status)) = msg.downcast_ref::<Saved>() {
            self.status.set_content(status.as_str());
            return None;
        }
        match self.fields.iter().find(|f| f.focused()).map(IdModel::id) {
            Some(id) => route_nested(&mut self.fields, NestedMsg::new(id, msg)),
            None => None,
        }
    }

    fn view(&self) -> String {
        let mut lines = vec![self.clock.view(), String::new()];
        lines.extend(self.fields.iter().map(Model::view));
        lines.push(String::new());
        lines.push(self.status.view());
        lines.join("\n")
    }
}

impl NestedModel for Form {
    fn id_models(&self) -> Vec<&dyn IdModel> {
        let mut models: Vec<&dyn IdModel> = vec![&self.clock as &dyn IdModel, &self.status];
        models.extend(self.fields.iter().map(|f| f as &dyn IdModel));
        models
    }

    fn id_models_mut(&mut self) -> Vec<&mut dyn IdModel> {
        let mut models: Vec<&mut dyn IdModel> = vec![&mut self.clock as &mut dyn IdModel, &mut self.status];
        models.extend(self.fields.iter_mut().map(|f| f as &mut dyn IdModel));
        models
    }

    fn update_nested_msg(&mut self, msg: NestedMsg) -> Cmd {
        if msg.id == self.clock.id() {
            let (_, inner) = msg.into_parts();
            let cmd = self.clock.update(inner);
            return nest(&self.clock, cmd);
        }
        route_nested(&mut self.fields, msg)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

    let config = ProgramConfig {
        exit_when_idle: false,
        ..ProgramConfig::default()
    };
    let program = Program::with_config(Form::new(), config).with_output(io::stdout());

    // Terminal events arrive on their own thread, like any other producer.
    let events = program.sender();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if events.send(Msg::new(event)).is_err() {
                break;
            }
        }
    });

    let result = program.run();

    execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    let form = result?;
    println!("{}", form.status.value());
    Ok(())
}
