mod common;

use common::{MockTransport, init_tracing};
use inputmodule::{InputModule, InputModuleManager, ModuleType};
use serialport::{SerialPortInfo, SerialPortType, UsbPortInfo};

fn usb_port(name: &str, serial_number: &str) -> SerialPortInfo {
    SerialPortInfo {
        port_name: name.to_string(),
        port_type: SerialPortType::UsbPort(UsbPortInfo {
            vid: 0x32AC,
            pid: 0x0020,
            serial_number: Some(serial_number.to_string()),
            manufacturer: Some("Framework".to_string()),
            product: None,
        }),
    }
}

fn mock_opener(module_type: ModuleType, path: &str) -> InputModule {
    let (transport, _) = MockTransport::new(path);
    InputModule::new(module_type, Box::new(transport))
}

#[test]
fn discovers_led_matrix_by_serial_number() {
    init_tracing();
    let ports = vec![usb_port("/dev/ttyACM3", "FRAKDEBZ0100000001")];
    let manager = InputModuleManager::from_ports_with(ports, mock_opener);

    let matrix = manager.input_module(ModuleType::LedMatrix, 0).unwrap();
    assert_eq!(matrix.path(), "/dev/ttyACM3");
    assert_eq!(matrix.module_type(), ModuleType::LedMatrix);
    assert_eq!(manager.is_type_available(ModuleType::LedMatrix), 1);
    assert_eq!(manager.is_type_available(ModuleType::B1Display), 0);
    assert_eq!(manager.is_type_available(ModuleType::C1MinimalModule), 0);
}

#[test]
fn keeps_enumeration_order_and_skips_foreign_devices() {
    let ports = vec![
        usb_port("/dev/ttyACM0", "E6614C311B7A3A2A"),
        usb_port("/dev/ttyACM1", "FRAKDEBZ0100000002"),
        SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::Unknown,
        },
        usb_port("/dev/ttyACM2", "FRAKDFBZ0100000003"),
        usb_port("", "FRAKDEBZ0100000004"),
        usb_port("/dev/ttyACM4", "FRAKDEBZ0100000005"),
    ];
    let manager = InputModuleManager::from_ports_with(ports, mock_opener);

    assert_eq!(manager.is_type_available(ModuleType::LedMatrix), 2);
    assert_eq!(
        manager.input_module(ModuleType::LedMatrix, 0).unwrap().path(),
        "/dev/ttyACM1"
    );
    assert_eq!(
        manager.input_module(ModuleType::LedMatrix, 1).unwrap().path(),
        "/dev/ttyACM4"
    );
}

#[test]
fn out_of_range_and_unknown_types_are_absent() {
    let ports = vec![usb_port("/dev/ttyACM0", "FRAKDEBZ0100000001")];
    let mut manager = InputModuleManager::from_ports_with(ports, mock_opener);

    assert!(manager.input_module(ModuleType::LedMatrix, 1).is_none());
    assert!(manager.input_module(ModuleType::B1Display, 0).is_none());
    assert!(manager.input_module_mut(ModuleType::C1MinimalModule, 0).is_none());
    assert!(manager.input_module_mut(ModuleType::LedMatrix, 0).is_some());
}

#[test]
fn modules_can_be_driven_from_separate_threads() {
    let ports = vec![
        usb_port("/dev/ttyACM0", "FRAKDEBZ0100000001"),
        usb_port("/dev/ttyACM1", "FRAKDEBZ0100000002"),
    ];
    let mut manager = InputModuleManager::from_ports_with(ports, mock_opener);

    std::thread::scope(|scope| {
        for matrix in manager.input_modules_mut(ModuleType::LedMatrix) {
            scope.spawn(move || {
                assert_eq!(matrix.set_sleep(false).unwrap(), 4);
            });
        }
    });
}

#[test]
fn skips_macos_dial_in_duplicates() {
    let ports = vec![
        usb_port("/dev/cu.usbmodem1101", "FRAKDEBZ0100000001"),
        usb_port("/dev/tty.usbmodem1101", "FRAKDEBZ0100000001"),
    ];
    let manager = InputModuleManager::from_ports_with(ports, mock_opener);

    assert_eq!(manager.is_type_available(ModuleType::LedMatrix), 1);
    assert_eq!(
        manager.input_module(ModuleType::LedMatrix, 0).unwrap().path(),
        "/dev/cu.usbmodem1101"
    );
}
