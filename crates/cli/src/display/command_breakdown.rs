use mbed_runner_core::MbedCommand;

/// Split an mbed command into the parts a dry run shows
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandBreakdown<'a> {
    pub subcommand: &'a str,
    pub target: Option<&'a str>,
    pub toolchain: Option<&'a str>,
    pub extra_args: Vec<&'a str>,
}

impl<'a> CommandBreakdown<'a> {
    pub fn of(command: &'a MbedCommand) -> Self {
        let mut breakdown = CommandBreakdown {
            subcommand: command.subcommand(),
            ..Default::default()
        };

        let mut args = command.args.iter().skip(1).map(String::as_str);
        while let Some(arg) = args.next() {
            match arg {
                "-m" => breakdown.target = args.next(),
                "-t" => breakdown.toolchain = args.next(),
                other => breakdown.extra_args.push(other),
            }
        }
        breakdown
    }
}

pub fn print_command_breakdown(program: &str, command: &MbedCommand) {
    let breakdown = CommandBreakdown::of(command);

    println!("   🔧 Command breakdown:");
    println!("      • program: {}", program);
    println!("      • subcommand: {}", breakdown.subcommand);
    if let Some(target) = breakdown.target {
        println!("      • target: {}", target);
    }
    if let Some(toolchain) = breakdown.toolchain {
        println!("      • toolchain: {}", toolchain);
    }
    if !breakdown.extra_args.is_empty() {
        println!("      • extraArgs: {:?}", breakdown.extra_args);
    }
    if let Some(dir) = &command.working_dir {
        println!("      • workingDir: {}", dir.display());
    }
}
