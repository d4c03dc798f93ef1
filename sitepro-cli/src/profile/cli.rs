use clap::{Arg, ArgAction, Command, arg, value_parser};

pub fn profile_args() -> Vec<Arg> {
    vec![
        arg!(-w --wig <TRACK>)
            .required(false)
            .num_args(1..)
            .action(ArgAction::Append)
            .help("Signal track file(s). Several tracks need a single BED file"),
        arg!(-b --bed <BED>)
            .required(false)
            .num_args(1..)
            .action(ArgAction::Append)
            .help("Site list (BED) file(s). Several BED files need a single track"),
        arg!(-f --format <FORMAT>)
            .required(false)
            .value_parser(["bigwig", "wig"])
            .help("Track file format [default: bigwig]"),
        arg!(--span <SPAN>)
            .required(false)
            .value_parser(value_parser!(i64))
            .help("Half-width of the window around each site center, in bp [default: 1000]"),
        Arg::new("pf-res")
            .long("pf-res")
            .value_name("RES")
            .required(false)
            .value_parser(value_parser!(i64))
            .help("Profiling resolution (bin width), in bp [default: 50]"),
        arg!(--dir "Reverse the profiles of sites on the - strand")
            .action(ArgAction::SetTrue),
        arg!(--confidence "Compute and draw 95% confidence intervals")
            .action(ArgAction::SetTrue),
        arg!(--dump "Write the profile of every site to <label>_dump.txt")
            .action(ArgAction::SetTrue),
        arg!(-l --label <LABEL>)
            .required(false)
            .num_args(1..)
            .action(ArgAction::Append)
            .help("Legend labels, one per track (or per BED file when there are several)"),
        arg!(-n --name <NAME>)
            .required(false)
            .help("Run name, used for the output files [default: sitepro_<date>]"),
        arg!(-o --output <DIR>)
            .required(false)
            .help("Output directory [default: .]"),
        arg!(--config <CONFIG>)
            .required(false)
            .help("TOML file with run settings; command line options override it"),
        arg!(--json "Also write the profiles as <name>.json")
            .action(ArgAction::SetTrue),
        Arg::new("no-r")
            .long("no-r")
            .action(ArgAction::SetTrue)
            .help("Only write the R script, do not run R"),
        arg!(--progress "Show a progress bar per track and BED file")
            .action(ArgAction::SetTrue),
    ]
}

pub fn logging_args() -> Vec<Arg> {
    vec![
        arg!(-v --verbose "More log output (repeat for trace)")
            .action(ArgAction::Count)
            .global(true),
        arg!(-q --quiet "Only log errors")
            .action(ArgAction::SetTrue)
            .conflicts_with("verbose")
            .global(true),
    ]
}

pub fn create_profile_cli(name: &'static str) -> Command {
    Command::new(name)
        .about("Calculate the average signal profile around the center of genomic sites.")
        .args(profile_args())
        .args(logging_args())
}
