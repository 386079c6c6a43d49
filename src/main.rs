//! RustRemoteIdBeacon - Main entry point
//!
//! On target: open NVS, boot the registry, then serve the serial console
//! and drain the system log over UART.
//!
//! On the host the same boot sequence runs against the mock store, so the
//! binary stays buildable and demonstrable everywhere.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use rust_remote_id_beacon::console::{execute, parse_line, LineBuffer};
    use rust_remote_id_beacon::serial::SerialDrain;
    use rust_remote_id_beacon::storage::NvsParamStore;
    use rust_remote_id_beacon::{bootstrap, identity, sys_error, sys_info};
    use rust_remote_id_beacon::{ParamRegistry, RomAssets};

    use esp_idf_svc::hal::gpio::AnyIOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys as esp_idf_sys;

    #[no_mangle]
    fn main() {
        esp_idf_sys::link_patches();

        let mut registry: ParamRegistry<NvsParamStore> = ParamRegistry::new();
        let report = bootstrap::run(
            &mut registry,
            NvsParamStore::open(bootstrap::NVS_NAMESPACE),
            &RomAssets::FACTORY,
            identity::read_mac_address(),
        );
        sys_info!(
            "boot: store={} ssid_derived={} provisioned={}",
            report.store_available,
            report.ssid_derived,
            report.provisioned
        );

        let Ok(peripherals) = Peripherals::take() else {
            sys_error!("peripherals unavailable");
            idle();
        };

        let config = uart::config::Config::new().baudrate(Hertz(115_200));
        let Ok(driver) = UartDriver::new(
            peripherals.uart1,
            peripherals.pins.gpio6,
            peripherals.pins.gpio7,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        ) else {
            sys_error!("UART init failed");
            idle();
        };
        let (tx, mut rx) = driver.split();
        let mut drain = SerialDrain::new(tx);
        let mut line = LineBuffer::new();

        loop {
            drain.poll();

            let mut byte = [0u8; 1];
            while rx.read(&mut byte, 0).unwrap_or(0) == 1 {
                match byte[0] {
                    b'\r' | b'\n' => {
                        let cmd = parse_line(line.as_str());
                        if let Err(e) = execute(&mut registry, &cmd, &mut drain) {
                            use core::fmt::Write;
                            let _ = writeln!(drain, "{}", e);
                        }
                        line.clear();
                    }
                    0x08 | 0x7f => line.backspace(),
                    b => line.push(b),
                }
            }

            // SAFETY: vTaskDelay is always safe to call
            unsafe {
                esp_idf_sys::vTaskDelay(1);
            }
        }
    }

    fn idle() -> ! {
        loop {
            // SAFETY: vTaskDelay is always safe to call
            unsafe {
                esp_idf_sys::vTaskDelay(1000);
            }
        }
    }
}

/// Host demo: boot against the mock store and dump the registry.
#[cfg(not(target_os = "espidf"))]
fn main() {
    use core::cell::RefCell;

    use rust_remote_id_beacon::console::{execute, parse_line};
    use rust_remote_id_beacon::serial::{format_log_entry, FORMATTED_LEN};
    use rust_remote_id_beacon::storage::{MockState, MockStore};
    use rust_remote_id_beacon::{bootstrap, identity, ParamRegistry, RomAssets, SYS_LOG};

    let state = RefCell::new(MockState::new());
    let mut registry: ParamRegistry<MockStore> = ParamRegistry::new();
    let report = bootstrap::run(
        &mut registry,
        Ok(MockStore::new(&state)),
        &RomAssets::FACTORY,
        identity::read_mac_address(),
    );
    println!(
        "boot: store={} ssid_derived={} provisioned={}",
        report.store_available, report.ssid_derived, report.provisioned
    );

    let mut out = String::new();
    for input in ["status", "show"] {
        println!("> {}", input);
        out.clear();
        let cmd = parse_line(input);
        match execute(&mut registry, &cmd, &mut out) {
            Ok(()) => print!("{}", out),
            Err(e) => println!("{}", e),
        }
    }

    while let Some(entry) = SYS_LOG.drain() {
        let mut buf = [0u8; FORMATTED_LEN];
        let len = format_log_entry(&entry, &mut buf);
        print!("{}", String::from_utf8_lossy(&buf[..len]));
    }
}
