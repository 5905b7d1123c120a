//! Prints published widget states to stdout. Diagnostics go to stderr.

use anyhow::Result;
use shared::{
    domain::TransformState,
    error::{FaultReport, FormError},
};

pub struct Renderer {
    json: bool,
    last_output: Option<String>,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            last_output: None,
        }
    }

    /// Re-render after a published change. Text mode only prints when the output moved.
    pub fn state_changed(&mut self, state: &TransformState) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(state)?);
            return Ok(());
        }
        if self.last_output.as_deref() == Some(state.output.as_str()) {
            return Ok(());
        }
        self.last_output = Some(state.output.clone());
        println!("> {}", state.output);
        Ok(())
    }

    pub fn show(&self, state: &TransformState) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(state)?);
        } else {
            println!(
                "input={:?} output={:?} prepend={} append={}",
                state.input, state.output, state.prepend, state.append
            );
        }
        Ok(())
    }

    pub fn fault(&self, err: &FormError) {
        if self.json {
            match serde_json::to_string(&FaultReport::from(err)) {
                Ok(raw) => eprintln!("{raw}"),
                Err(_) => eprintln!("error: {err}"),
            }
        } else {
            eprintln!("error: {err}");
        }
    }

    pub fn unknown(&self, line: &str) {
        eprintln!("unrecognised command {line:?}; try :prepend on|off, :append on|off, :submit, :state, :clear, :quit");
    }
}
