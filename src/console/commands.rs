//! Command handlers

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::params::{
    ParamDescriptor, ParamFlags, ParamRegistry, ParamType, ParamValue, Persist,
};
use crate::storage::ParamStore;

/// Command descriptor (for `help` and completion)
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands" },
    CommandDescriptor { name: "show", brief: "Show parameters" },
    CommandDescriptor { name: "set", brief: "Set parameter value" },
    CommandDescriptor { name: "save", brief: "Persist all parameters" },
    CommandDescriptor { name: "status", brief: "Registry and store state" },
];

/// Execute a parsed command against the registry
pub fn execute<S: ParamStore>(
    registry: &mut ParamRegistry<S>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    match cmd.command {
        "" => Ok(()), // Empty line, do nothing
        "help" => cmd_help(cmd, out),
        "show" => cmd_show(registry, cmd, out),
        "set" => cmd_set(registry, cmd, out),
        "save" => cmd_save(registry, out),
        "status" => cmd_status(registry, out),
        _ => Err(ConsoleError::UnknownCommand),
    }
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        if let Some(c) = COMMANDS.iter().find(|c| c.name == name) {
            let _ = writeln!(out, "{}: {}", c.name, c.brief);
        } else {
            return Err(ConsoleError::UnknownCommand);
        }
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<8} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_show<S: ParamStore>(
    registry: &ParamRegistry<S>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        // Explicit name works even for hidden parameters
        let id = registry
            .find_by_name(name)
            .ok_or(ConsoleError::UnknownParam)?;
        write_param(registry.descriptor(id), registry.get(id), out);
        return Ok(());
    }

    for index in 0..registry.count() {
        let Some(id) = registry.find_by_index(index) else {
            continue;
        };
        let descriptor = registry.descriptor(id);
        if descriptor.flags.contains(ParamFlags::HIDDEN) {
            continue;
        }
        write_param(descriptor, registry.get(id), out);
    }
    Ok(())
}

fn cmd_set<S: ParamStore>(
    registry: &mut ParamRegistry<S>,
    cmd: &ParsedCommand<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let name = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let id = registry
        .find_by_name(name)
        .ok_or(ConsoleError::UnknownParam)?;

    // Parse per the descriptor's type tag, then go through the validated
    // setter. OutOfRange/TooShort surface as their console codes.
    let persist = match registry.descriptor(id).param_type() {
        ParamType::U8 => {
            let v: u8 = value.parse().map_err(|_| ConsoleError::InvalidValue)?;
            registry.set_u8(id, v)?
        }
        ParamType::U32 => {
            let v: u32 = value.parse().map_err(|_| ConsoleError::InvalidValue)?;
            registry.set_u32(id, v)?
        }
        ParamType::F32 => {
            let v: f32 = value.parse().map_err(|_| ConsoleError::InvalidValue)?;
            registry.set_f32(id, v)?
        }
        ParamType::Str20 | ParamType::Str64 => registry.set_str(id, value)?,
        ParamType::None => return Err(ConsoleError::UnknownParam),
    };

    // Echo the stored value, not the raw input: PASSWORD masking and
    // string truncation both apply to the echo
    write_param(registry.descriptor(id), registry.get(id), out);
    if let Persist::Failed(_) = persist {
        let _ = writeln!(out, "warning: value not persisted");
    }
    Ok(())
}

fn cmd_save<S: ParamStore>(
    registry: &mut ParamRegistry<S>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    registry.persist_all()?;
    let _ = writeln!(out, "saved {} parameters", registry.count());
    Ok(())
}

fn cmd_status<S: ParamStore>(
    registry: &ParamRegistry<S>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let _ = writeln!(out, "parameters: {}", registry.count());
    let _ = writeln!(
        out,
        "store:      {}",
        if registry.store_attached() { "ok" } else { "unavailable" }
    );
    let _ = writeln!(
        out,
        "basic id:   {}",
        if registry.have_basic_id_info() { "ready" } else { "incomplete" }
    );
    let _ = writeln!(out, "log drops:  {}", crate::SYS_LOG.dropped());
    Ok(())
}

/// Print `NAME=value`, masking PASSWORD-flagged parameters.
fn write_param(descriptor: &ParamDescriptor, value: &ParamValue, out: &mut dyn Write) {
    if descriptor.flags.contains(ParamFlags::PASSWORD) {
        let _ = writeln!(out, "{}=********", descriptor.name);
        return;
    }
    match value {
        ParamValue::U8(v) => {
            let _ = writeln!(out, "{}={}", descriptor.name, v);
        }
        ParamValue::U32(v) => {
            let _ = writeln!(out, "{}={}", descriptor.name, v);
        }
        ParamValue::F32(v) => {
            let _ = writeln!(out, "{}={}", descriptor.name, v);
        }
        ParamValue::Str20(s) => {
            let _ = writeln!(out, "{}={}", descriptor.name, s);
        }
        ParamValue::Str64(s) => {
            let _ = writeln!(out, "{}={}", descriptor.name, s);
        }
    }
}
