//! End-to-end runs of component trees under the program host.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bramble::{
    batch, cmd, focus_next, focus_prev, init_nested, nest, quit, route_nested, sequence, tick,
    update_nested_model, update_tick_model, Cmd, CmdModel, Command, Disconnected, FocusModel, IdModel,
    Identity, Input, Model, Msg, NestedModel, NestedMsg, Program, ProgramConfig, TickModel, Text,
    ValidationError,
};
use crossbeam_channel::{unbounded, Receiver};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

struct Saving;
struct Submitted(Vec<String>);

struct Form {
    id: Identity,
    inputs: Vec<Input>,
    status: Text,
    log: Vec<&'static str>,
}

impl Form {
    fn new() -> Self {
        let name = Input::new().with_prompts("  name: ", "> name: ");
        let age = Input::new()
            .with_prompts("  age: ", "> age: ")
            .with_validator(|value| {
                if value.chars().all(|c| c.is_ascii_digit()) {
                    Ok(())
                } else {
                    Err(ValidationError::new("age must be a number"))
                }
            });
        Self {
            id: Identity::new(),
            inputs: vec![name, age],
            status: Text::new("editing"),
            log: Vec::new(),
        }
    }

    fn focused(&self) -> Option<Identity> {
        self.inputs.iter().find(|i| i.focused()).map(IdModel::id)
    }

    fn submit(&self) -> Cmd {
        let values: Vec<String> = self.inputs.iter().map(|i| i.value().to_owned()).collect();
        sequence([
            Some(Command::message(Saving)),
            Some(Command::new(move || Msg::new(Submitted(values)))),
        ])
    }
}

impl Model for Form {
    fn init(&mut self) -> Cmd {
        let children = init_nested(self);
        batch([children, focus_next(&mut self.inputs)])
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        if matches!(msg, Msg::Nested(_)) {
            return update_nested_model(self, msg);
        }
        if let Some(key) = msg.downcast_ref::<KeyEvent>() {
            match key.code {
                KeyCode::Tab => return focus_next(&mut self.inputs),
                KeyCode::BackTab => return focus_prev(&mut self.inputs),
                KeyCode::Enter => return self.submit(),
                _ => {}
            }
            return match self.focused() {
                Some(id) => route_nested(&mut self.inputs, NestedMsg::new(id, msg)),
                None => None,
            };
        }
        if msg.is::<Saving>() {
            self.log.push("saving");
            self.status.set_content("saving");
            return None;
        }
        match msg.downcast::<Submitted>() {
            Ok(Submitted(values)) => {
                self.log.push("submitted");
                self.status.set_content(format!("saved: {}", values.join(", ")));
                quit()
            }
            Err(_) => None,
        }
    }

    fn view(&self) -> String {
        let mut lines: Vec<String> = self.inputs.iter().map(Model::view).collect();
        lines.push(self.status.view());
        lines.join("\n")
    }
}

impl IdModel for Form {
    fn id(&self) -> Identity {
        self.id
    }
}

impl NestedModel for Form {
    fn id_models(&self) -> Vec<&dyn IdModel> {
        let mut models: Vec<&dyn IdModel> = self.inputs.iter().map(|i| i as &dyn IdModel).collect();
        models.push(&self.status);
        models
    }

    fn id_models_mut(&mut self) -> Vec<&mut dyn IdModel> {
        let mut models: Vec<&mut dyn IdModel> = self.inputs.iter_mut().map(|i| i as &mut dyn IdModel).collect();
        models.push(&mut self.status);
        models
    }

    fn update_nested_msg(&mut self, msg: NestedMsg) -> Cmd {
        if msg.id == self.status.id() {
            let (_, inner) = msg.into_parts();
            let cmd = self.status.update(inner);
            return nest(&self.status, cmd);
        }
        route_nested(&mut self.inputs, msg)
    }
}

fn key(code: KeyCode) -> Msg {
    Msg::new(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(program: &Program<Form>, text: &str) {
    for c in text.chars() {
        program.send(key(KeyCode::Char(c)));
    }
}

#[derive(Clone, Default)]
struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_form_fills_and_submits_in_order() {
    let output = SharedOutput::default();
    let program = Program::new(Form::new()).with_output(output.clone());

    type_text(&program, "ada");
    program.send(key(KeyCode::Tab));
    type_text(&program, "36");
    program.send(key(KeyCode::Enter));

    let form = program.run().expect("program ran");
    assert_eq!(form.inputs[0].value(), "ada");
    assert_eq!(form.inputs[1].value(), "36");
    assert_eq!(form.log, vec!["saving", "submitted"]);
    assert_eq!(form.status.value(), "saved: ada, 36");

    let mut parser = vt100::Parser::new(3, 40, 0);
    parser.process(&output.bytes());
    let rows: Vec<String> = parser.screen().rows(0, 40).collect();
    assert_eq!(rows[0].trim_end(), "  name: ada");
    assert_eq!(rows[1].trim_end(), "> age: 36");
    assert_eq!(rows[2].trim_end(), "saved: ada, 36");
}

#[test]
fn test_invalid_field_keeps_focus() {
    let mut program = Program::new(Form::new());
    program.start().expect("started");

    program.send(key(KeyCode::Tab));
    program.send(key(KeyCode::Char('x')));
    program.send(key(KeyCode::BackTab));
    while program.step(Duration::from_millis(50)).expect("step") {}

    let form = program.model();
    assert!(!form.inputs[0].focused());
    assert!(form.inputs[1].focused());
    assert_eq!(form.inputs[1].value(), "x");
}

#[test]
fn test_messages_for_removed_children_are_dropped() {
    let mut program = Program::new(Form::new());
    program.start().expect("started");

    let removed = program.model_mut().inputs.remove(1);
    program.send(Msg::Nested(NestedMsg::new(removed.id(), key(KeyCode::Char('z')))));
    assert!(program.step(Duration::from_millis(50)).expect("step"));

    let form = program.model();
    assert_eq!(form.inputs.len(), 1);
    assert_eq!(form.inputs[0].value(), "");
}

struct Clock {
    rx: Receiver<Command>,
    ticks: u32,
    received: Vec<String>,
    disconnected: bool,
}

impl Clock {
    fn done(&self) -> bool {
        self.ticks >= 3 && self.disconnected
    }
}

impl Model for Clock {
    fn init(&mut self) -> Cmd {
        batch([tick(self), cmd(self)])
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        if matches!(msg, Msg::Tick(_)) {
            self.ticks += 1;
            if self.done() {
                return quit();
            }
            return update_tick_model(self, &msg);
        }
        if msg.is::<Disconnected>() {
            self.disconnected = true;
            return if self.done() { quit() } else { None };
        }
        match msg.downcast::<String>() {
            Ok(line) => {
                self.received.push(line);
                cmd(self)
            }
            Err(_) => None,
        }
    }

    fn view(&self) -> String {
        format!("ticks: {}", self.ticks)
    }
}

impl TickModel for Clock {
    fn frame_duration(&self) -> Duration {
        Duration::from_millis(5)
    }
}

impl CmdModel for Clock {
    fn cmd_chan(&self) -> Receiver<Command> {
        self.rx.clone()
    }
}

#[test]
fn test_ticks_and_channel_bridge_share_the_loop() {
    let (tx, rx) = unbounded();
    tx.send(Command::message(String::from("first"))).expect("queued");
    tx.send(Command::message(String::from("second"))).expect("queued");
    drop(tx);

    let clock = Clock {
        rx,
        ticks: 0,
        received: Vec::new(),
        disconnected: false,
    };
    let config = ProgramConfig {
        exit_when_idle: false,
        ..ProgramConfig::default()
    };

    let clock = Program::with_config(clock, config).run().expect("program ran");
    assert!(clock.ticks >= 3);
    assert_eq!(clock.received, vec!["first", "second"]);
    assert!(clock.disconnected);
}
