mod common;

use anyhow::Result;
use common::{count, delays, frame, ssd1681, Event};
use embedded_hal::spi::ErrorKind;
use epaper::{
    BusyWait, Color, Config, ConfigError, ControllerState, DisplayRotation, Error, Panel,
    RefreshMode,
};

const WHITE_FRAME: usize = 25 * 200;

#[test]
fn configure_resets_and_initializes() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;

    let events = bench.events();
    assert_eq!(
        events[..8],
        [
            Event::Cs(true),
            Event::En(true),
            Event::Rst(true),
            Event::Delay(100),
            Event::Rst(false),
            Event::Delay(100),
            Event::Rst(true),
            Event::Delay(200),
        ]
    );
    assert_eq!(
        bench.frames(),
        vec![
            frame(0x12, &[]),
            frame(0x01, &[0xC7, 0x00, 0x00]),
            frame(0x11, &[0x03]),
            frame(0x44, &[0x00, 0x18]),
            frame(0x45, &[0x00, 0x00, 0xC7, 0x00]),
            frame(0x3C, &[0x05]),
            frame(0x18, &[0x80]),
        ]
    );
    assert_eq!(display.state(), ControllerState::Idle);
    Ok(())
}

#[test]
fn burst_framing_one_chip_select_per_command() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;

    let events = bench.events();
    assert_eq!(count(&events, &Event::Cs(false)), bench.frames().len());
    assert!(!events.iter().any(|e| matches!(e, Event::Transfer(_))));
    Ok(())
}

#[test]
fn display_after_configure_is_all_white() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;
    bench.clear();

    display.display()?;

    let frames = bench.frames();
    assert_eq!(frames.len(), 5);
    assert_eq!(frames[0], frame(0x4E, &[0x00]));
    assert_eq!(frames[1], frame(0x4F, &[0x00, 0x00]));
    assert_eq!(frames[2].cmd, 0x24);
    assert_eq!(frames[2].data.len(), WHITE_FRAME);
    assert!(frames[2].data.iter().all(|&b| b == 0xFF));
    assert_eq!(frames[3], frame(0x22, &[0xF7]));
    assert_eq!(frames[4], frame(0x20, &[]));

    // counters, write command, one burst per row, update control, activation
    assert_eq!(count(&bench.events(), &Event::Cs(false)), 2 + 1 + 200 + 1 + 1);
    assert_eq!(display.state(), ControllerState::Idle);
    Ok(())
}

#[test]
fn rectangle_reaches_panel_ram() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;
    display.fill_rectangle(0, 0, 200, 200, Color::White)?;
    display.fill_rectangle(5, 5, 10, 1, Color::Black)?;
    bench.clear();

    display.display()?;

    let ram = &bench.frames()[2].data;
    let pos = 5 * 25 + 5 / 8;
    assert_eq!(ram[pos], 0b1111_1000);
    assert_eq!(ram[pos + 1], 0b0000_0001);
    let changed = ram.iter().filter(|&&b| b != 0xFF).count();
    assert_eq!(changed, 2);
    Ok(())
}

#[test]
fn partial_refresh_is_one_shot() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;

    display.set_lut(RefreshMode::Partial)?;
    bench.clear();
    display.display()?;
    assert_eq!(bench.frames()[3], frame(0x22, &[0xFF]));

    bench.clear();
    display.display()?;
    assert_eq!(bench.frames()[3], frame(0x22, &[0xF7]));
    Ok(())
}

#[test]
fn busy_line_is_polled_at_10ms() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;
    bench.busy_for(3);
    bench.clear();

    display.display()?;

    assert_eq!(delays(&bench.events()), vec![10, 10, 10]);
    Ok(())
}

#[test]
fn stuck_busy_line_times_out() {
    let (mut display, bench) = ssd1681();
    bench.stick_busy();

    let result = display.configure(Config::new().busy_wait(BusyWait::bounded(10, 50)));

    assert!(matches!(result, Err(Error::Timeout { waited_ms: 50 })));
    assert_eq!(bench.busy_reads(), 6);
    assert_ne!(display.state(), ControllerState::Idle);
}

#[test]
fn bus_error_is_returned_verbatim() {
    let (mut display, bench) = ssd1681();
    bench.fail_spi_after(0);

    let result = display.configure(Config::new());

    assert!(matches!(result, Err(Error::Spi(ErrorKind::Other))));
}

#[test]
fn invalid_config_touches_nothing() {
    let (mut display, bench) = ssd1681();

    let result = display.configure(Config::new().width(201));

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::TooLarge { width: 201, .. }))
    ));
    assert!(bench.events().is_empty());
    assert_eq!(display.state(), ControllerState::Uninitialized);
}

#[test]
fn display_needs_configure() {
    let (mut display, bench) = ssd1681();

    let result = display.display();

    assert!(matches!(
        result,
        Err(Error::NotReady(ControllerState::Uninitialized))
    ));
    assert!(bench.events().is_empty());
}

#[test]
fn deep_sleep_requires_configure_to_resume() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;
    bench.clear();

    display.deep_sleep()?;
    assert_eq!(bench.frames(), vec![frame(0x10, &[0x01])]);
    assert_eq!(display.state(), ControllerState::DeepSleep);

    assert!(matches!(
        display.display(),
        Err(Error::NotReady(ControllerState::DeepSleep))
    ));
    assert!(matches!(
        display.set_lut(RefreshMode::Partial),
        Err(Error::NotReady(ControllerState::DeepSleep))
    ));

    display.configure(Config::new())?;
    display.display()?;
    Ok(())
}

#[test]
fn clear_display_writes_white_ram() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(Config::new())?;
    display.fill_rectangle(0, 0, 200, 200, Color::Black)?;
    bench.clear();

    display.clear_display()?;

    let frames = bench.frames();
    assert_eq!(frames[2].cmd, 0x24);
    assert_eq!(frames[2].data, vec![0xFF; WHITE_FRAME]);
    assert_eq!(frames[3], frame(0x22, &[0xF7]));
    assert!(display.framebuffer().buffer().iter().all(|&b| b == 0xFF));
    Ok(())
}

#[test]
fn smaller_panel_and_rotation() -> Result<()> {
    let (mut display, bench) = ssd1681();
    display.configure(
        Config::new()
            .width(152)
            .height(152)
            .rotation(DisplayRotation::Rotate90),
    )?;

    assert!(bench.frames().contains(&frame(0x44, &[0x00, 0x12])));
    assert_eq!(Panel::size(&display), (152, 152));

    display.set_pixel(0, 0, Color::Black);
    // rotated (0, 0) is native (151, 0)
    assert_eq!(display.framebuffer().buffer()[151 / 8], !(0x80u8 >> (151 % 8)));
    Ok(())
}

#[test]
fn failed_rectangle_leaves_framebuffer_alone() -> Result<()> {
    let (mut display, _bench) = ssd1681();
    display.configure(Config::new())?;
    display.fill_rectangle(10, 10, 20, 20, Color::Black)?;
    let before = display.framebuffer().buffer().to_vec();

    assert!(display.fill_rectangle(195, 0, 6, 1, Color::White).is_err());
    assert!(display.fill_rectangle(0, 0, 0, 1, Color::White).is_err());
    assert_eq!(display.framebuffer().buffer(), &before[..]);
    Ok(())
}
