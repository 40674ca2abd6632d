use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use macaddr::MacAddr6;
use pnet::packet::ethernet::{EtherType, MutableEthernetPacket};
use pnet::util::MacAddr;
use tracing_subscriber::EnvFilter;

use snfkit::config::Config;
use snfkit::reporter::{ConsoleReporter, Reporter};
use snfkit::{
    CancelToken, Device, InterfaceDirectory, ReflectChannel, Signal, SnfDriver, SnfError,
};

/// Ethernet header plus the minimum payload, without the CRC.
const PROBE_FRAME_LEN: usize = 60;

#[derive(Parser)]
#[command(name = "snfctl")]
#[command(about = "Inspect Sniffer interfaces and reflect frames to the kernel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Sniffer-capable interfaces
    List {
        /// Show ring and injection capacities
        #[arg(short, long)]
        verbose: bool,
    },
    /// Find an interface by MAC address or name
    Find {
        /// MAC address (e.g., 00:60:dd:44:55:66)
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        mac: Option<MacAddr6>,
        /// Interface name, as in ifconfig
        #[arg(long)]
        name: Option<String>,
    },
    /// Show valid and link-up port masks
    Ports,
    /// Reflect probe frames into the kernel stack
    Reflect {
        /// SNF port to open (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u32>,
        /// Number of frames to reflect
        #[arg(short, long, default_value_t = 1)]
        count: u64,
        /// Destination MAC of the probe frame
        #[arg(long, default_value = "ff:ff:ff:ff:ff:ff")]
        dst: MacAddr6,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a command. `Ok(false)` means it ran but found nothing.
fn run(command: Commands, config: &Config) -> Result<bool> {
    let directory = InterfaceDirectory::new(SnfDriver);

    match command {
        Commands::List { verbose } => {
            let interfaces = directory
                .list_interfaces()
                .context("failed to list interfaces")?;
            ConsoleReporter::new()
                .with_verbose(verbose)
                .report_interfaces(&interfaces);
            Ok(true)
        }
        Commands::Find { mac, name } => {
            let (query, found) = match (mac, name) {
                (Some(mac), _) => (mac.to_string(), directory.find_by_hardware_address(mac)),
                (None, Some(name)) => {
                    let found = directory.find_by_name(&name);
                    (name, found)
                }
                (None, None) => return Err(anyhow!("either --mac or --name is required")),
            };
            let found = found.context("failed to look up interface")?;
            ConsoleReporter::new().report_match(&query, found.as_ref());
            Ok(found.is_some())
        }
        Commands::Ports => {
            let mask = directory
                .compute_port_mask()
                .context("failed to compute port mask")?;
            ConsoleReporter::new().report_port_mask(&mask);
            Ok(true)
        }
        Commands::Reflect { port, count, dst } => {
            let port = port.unwrap_or(config.port);
            reflect(&directory, port, config.num_rings, count, dst)
        }
    }
}

fn reflect(
    directory: &InterfaceDirectory<SnfDriver>,
    port: u32,
    num_rings: i32,
    count: u64,
    dst: MacAddr6,
) -> Result<bool> {
    let interface = directory
        .list_interfaces()
        .context("failed to list interfaces")?
        .into_iter()
        .find(|ifa| ifa.port_number == port)
        .ok_or_else(|| anyhow!("no Sniffer-capable interface on port {}", port))?;

    let frame = probe_frame(dst, interface.mac_address);

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    // Runs on SIGINT, SIGTERM and SIGHUP without saying which
    ctrlc::set_handler(move || {
        handler_token.trip(Signal::SHUTDOWN);
    })
    .context("failed to install signal handler")?;

    let device = Device::open(port, num_rings)
        .with_context(|| format!("failed to open port {}", port))?;
    let reporter = ConsoleReporter::new();

    let (sent, stopped_by) = {
        let mut channel = ReflectChannel::enable_with_cancel(SnfDriver, &device, cancel)
            .context("failed to enable reflection")?;

        reporter.on_reflect_start(&interface.name, count);
        let mut sent = 0;
        let mut stopped_by = None;
        while sent < count {
            if let Err(e) = channel.send(&frame) {
                stopped_by = Some(e);
                break;
            }
            sent += 1;
        }
        (sent, stopped_by)
    };

    reporter.on_reflect_stop(sent, stopped_by.as_ref());
    device.close().context("failed to close device")?;

    match stopped_by {
        None | Some(SnfError::Cancelled(_)) => Ok(true),
        Some(e) => Err(e).context("reflection failed"),
    }
}

/// Build a zero-padded probe frame from `src` to `dst`.
fn probe_frame(dst: MacAddr6, src: MacAddr6) -> Vec<u8> {
    let mut buffer = vec![0u8; PROBE_FRAME_LEN];
    if let Some(mut ethernet) = MutableEthernetPacket::new(&mut buffer) {
        ethernet.set_destination(to_pnet(dst));
        ethernet.set_source(to_pnet(src));
        // IEEE local experimental ethertype
        ethernet.set_ethertype(EtherType::new(0x88b5));
    }
    buffer
}

fn to_pnet(mac: MacAddr6) -> MacAddr {
    let [a, b, c, d, e, f] = mac.into_array();
    MacAddr::new(a, b, c, d, e, f)
}
