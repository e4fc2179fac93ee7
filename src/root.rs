use crate::device::{CombineStatus, RxCombine, RxCore, RxCoreStatus};
use crate::logging::{log_debug, log_info};
use crate::memory::{self, combine, rx_core, Field, Lane, CARRIER_CORE_BASE};
use crate::settings::RootConfig;
use crate::transport::{Connect, ControlServer, Link, MemoryBus};
use crate::window::{Error, RegisterWindow};

/// One mounted device of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceNode {
    pub name: &'static str,
    /// Lane for per-lane cores, `None` for singletons
    pub lane: Option<Lane>,
    /// Absolute base address
    pub base: u64,
    pub fields: &'static [Field],
}

/// Polling snapshot of the whole application
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplicationStatus {
    /// Indexed by lane
    pub rx_cores: [RxCoreStatus; memory::RX_CORE_COUNT],
    pub combine: CombineStatus,
}

/// Every device of the application, in mount order
pub fn devices() -> impl Iterator<Item = DeviceNode> {
    let cores = Lane::ALL.into_iter().map(|lane| DeviceNode {
        name: rx_core::DEVICE_NAME,
        lane: Some(lane),
        base: lane.rx_core_base(),
        fields: rx_core::FIELDS,
    });

    cores.chain(core::iter::once(DeviceNode {
        name: combine::DEVICE_NAME,
        lane: None,
        base: memory::combine_base(),
        fields: combine::FIELDS,
    }))
}

/// Looks up a device by name and lane, then a field by name
pub fn find_field(
    device: &str,
    lane: Option<Lane>,
    field: &str,
) -> Option<(DeviceNode, &'static Field)> {
    let node = devices().find(|node| node.name == device && node.lane == lane)?;
    let field = memory::find(node.fields, field)?;

    Some((node, field))
}

/// Top of the device tree.
///
/// Owns the bus and mounts the carrier core at `0x0000_0000` and the
/// application (four receiver cores plus the combine block) at `0x8000_0000`.
pub struct Root<B> {
    bus: B,
    config: RootConfig,
}

#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
impl<B> Root<B>
where
    B: MemoryBus,
{
    /// Wraps a bus that was already opened over `config.link()`
    pub fn new(bus: B, config: RootConfig) -> Self {
        log_info!(
            "root on {:?} port {} (SRPv{})",
            config.host.octets(),
            config.link().port(),
            u8::from(config.link().srp_version())
        );

        Self { bus, config }
    }

    /// Opens the bus over the link selected by `config` and mounts the tree
    pub async fn connect(config: RootConfig) -> Result<Self, B::Error>
    where
        B: Connect,
    {
        let bus = B::connect(config.host, config.link()).await?;

        Ok(Self::new(bus, config))
    }

    /// Releases ownership of the bus
    pub fn free(self) -> B {
        self.bus
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn link(&self) -> Link {
        self.config.link()
    }

    pub fn control_server(&self) -> Option<ControlServer> {
        self.config.control_server
    }

    pub fn rx_core(&mut self, lane: Lane) -> RxCore<'_, B> {
        RxCore::new(&mut self.bus, lane.rx_core_base())
    }

    pub fn combine(&mut self) -> RxCombine<'_, B> {
        RxCombine::new(&mut self.bus, memory::combine_base())
    }

    /// Raw window on the carrier core
    pub fn carrier(&mut self) -> RegisterWindow<'_, B> {
        RegisterWindow::new(&mut self.bus, CARRIER_CORE_BASE)
    }

    pub fn device(&mut self, node: &DeviceNode) -> RegisterWindow<'_, B> {
        RegisterWindow::new(&mut self.bus, node.base)
    }

    /// Performs the initial read of the tree if `init_read` is set
    pub async fn start(&mut self) -> Result<(), Error> {
        if self.config.init_read {
            let reads = self.read_all().await?;
            log_info!("initial read done, {} elements", reads);
        }

        Ok(())
    }

    /// Reads every element of every readable field once. Returns the number
    /// of elements read.
    pub async fn read_all(&mut self) -> Result<usize, Error> {
        let mut reads = 0;

        for node in devices() {
            let mut window = RegisterWindow::new(&mut self.bus, node.base);

            for field in node.fields.iter().filter(|field| field.is_readable()) {
                for index in 0..field.element_count() {
                    window.read_field(field, index).await?;
                    reads += 1;
                }
            }
        }

        Ok(reads)
    }

    /// Strobes `CntRst` on every receiver core, in mount order. The combine
    /// block keeps its counters.
    pub async fn count_reset(&mut self) -> Result<(), Error> {
        for lane in Lane::ALL {
            self.rx_core(lane).reset_counters().await?;
        }

        Ok(())
    }

    /// Strobes `HardRst` on every receiver core, in mount order
    pub async fn hard_reset(&mut self) -> Result<(), Error> {
        for lane in Lane::ALL {
            self.rx_core(lane).hard_reset().await?;
        }

        log_info!("hard reset of all receiver cores");

        Ok(())
    }

    /// Takes one polling snapshot. `None` when polling is disabled.
    pub async fn poll(&mut self) -> Result<Option<ApplicationStatus>, Error> {
        if !self.config.poll_enabled {
            return Ok(None);
        }

        let mut status = ApplicationStatus::default();

        for lane in Lane::ALL {
            status.rx_cores[u8::from(lane) as usize] = self.rx_core(lane).read_status().await?;
        }

        status.combine = self.combine().read_status().await?;
        log_debug!("poll complete");

        Ok(Some(status))
    }
}
