use std::fmt::Write;

use machine::{Machine, State};

/// Number of trailing opcodes shown by the inspector.
const HISTORY_SHOWN: usize = 8;

/// Logs the inspector panel for this frame.
pub fn dump(machine: &Machine) {
    let recent: Vec<u16> = machine.history().collect();
    let start = recent.len().saturating_sub(HISTORY_SHOWN);
    log::debug!("\n{}", render(machine.state(), &recent[start..]));
}

/// Formats the register/timer/history snapshot the debug view displays.
fn render(state: &State, recent: &[u16]) -> String {
    let mut panel = String::new();
    let _ = writeln!(
        panel,
        "pc={:#06X} i={:#06X} sp={} dt={} st={}",
        state.pc, state.i, state.sp, state.delay_timer, state.sound_timer
    );
    for row in 0..4 {
        let regs: Vec<String> = (0..4)
            .map(|col| {
                let r = row * 4 + col;
                format!("v{:X}={:02X}", r, state.v[r])
            })
            .collect();
        let _ = writeln!(panel, "{}", regs.join(" "));
    }
    let opcodes: Vec<String> = recent.iter().map(|op| format!("{op:04X}")).collect();
    let _ = write!(panel, "last: {}", opcodes.join(" "));
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_registers_timers_and_history() {
        let mut state = State::new();
        state.v[0x1] = 0xAB;
        state.i = 0x2F0;
        state.delay_timer = 9;

        let panel = render(&state, &[0x00E0, 0xA22A]);
        assert!(panel.contains("pc=0x0200"));
        assert!(panel.contains("i=0x02F0"));
        assert!(panel.contains("dt=9"));
        assert!(panel.contains("v1=AB"));
        assert!(panel.contains("last: 00E0 A22A"));
    }

    #[test]
    fn test_render_lists_all_sixteen_registers() {
        let panel = render(&State::new(), &[]);
        for r in 0..16 {
            assert!(panel.contains(&format!("v{r:X}=00")));
        }
    }
}
