use pendulum_clock::{ClockConfig, FrameDriver};
use pendulum_engine::device::GpuInit;
use pendulum_engine::logging::{LoggingConfig, init_logging};
use pendulum_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

fn main() {
    init_logging(LoggingConfig::default());

    let config = ClockConfig::from_env();
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.width, config.height),
    };
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    log::info!("starting {:?}", config.title);

    let driver: FrameDriver = FrameDriver::new(config);
    if let Err(err) = Runtime::run(runtime, gpu_init, driver) {
        log::error!("{err:#}");
        std::process::exit(1);
    }

    log::info!("bye");
}
