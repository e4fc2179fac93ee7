use arbitrary_int::u10;

#[cfg(not(feature = "async"))]
use embedded_hal::delay::DelayNs;
#[cfg(feature = "async")]
use embedded_hal_async::delay::DelayNs;

use crate::logging::{log_info, log_warn};
use crate::memory::rx_core::bsa::{
    BsaQuantityRegister, BsaSeverityRegister, MpsPermitRegister, RemoteTimestampRegister,
    RxBsaChannel, RX_BSA_CHANNEL_COUNT,
};
use crate::memory::rx_core::control::{
    CounterResetRegister, GtResetRegister, HardResetRegister, LoopbackRegister,
    RollOverEnableRegister, RxPolarityRegister, TxPolarityRegister,
};
use crate::memory::rx_core::status::{
    LinkStatusRegister, PacketRateRegister, SofRateRegister, StatusCounter,
    StatusCounterRegister, UserValueRegister, STATUS_COUNTER_COUNT,
};
use crate::memory::rx_core::RxCoreCommand;
use crate::memory::Severity;
use crate::transport::MemoryBus;
use crate::window::{Error, RegisterWindow};

/// Number of link checks made after a GTH reset before giving up
pub const LINK_UP_ATTEMPTS: usize = 100;

/// Everything the core exposes for polling, read in one pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RxCoreStatus {
    /// Indexed by `StatusCounter as usize`
    pub counters: [u32; STATUS_COUNTER_COUNT],
    pub rx_link_up: bool,
    pub cpll_lock: bool,
    pub packet_rate_hz: u32,
    pub sof_rate_hz: u32,
    pub user_value: u128,
    pub bsa_quantity: [u32; RX_BSA_CHANNEL_COUNT],
    pub bsa_severity: [Severity; RX_BSA_CHANNEL_COUNT],
    pub mps_permit: u8,
    pub remote_timestamp: u64,
}

impl RxCoreStatus {
    pub fn counter(&self, counter: StatusCounter) -> u32 {
        self.counters[u8::from(counter) as usize]
    }
}

/// Handle on one lane's `BsaMpsMsgRxCore`
pub struct RxCore<'a, B> {
    window: RegisterWindow<'a, B>,
}

#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
impl<'a, B> RxCore<'a, B>
where
    B: MemoryBus,
{
    pub fn new(bus: &'a mut B, base: u64) -> Self {
        Self {
            window: RegisterWindow::new(bus, base),
        }
    }

    /// Raw access to the core's registers
    pub fn window(&mut self) -> &mut RegisterWindow<'a, B> {
        &mut self.window
    }

    /* Status */

    pub async fn status_counter(&mut self, counter: StatusCounter) -> Result<u32, Error> {
        let reg = self
            .window
            .read_repeated_register::<StatusCounterRegister>(counter)
            .await?;

        Ok(reg.count())
    }

    pub async fn status_counters(&mut self) -> Result<[u32; STATUS_COUNTER_COUNT], Error> {
        let mut counters = [0u32; STATUS_COUNTER_COUNT];

        for (slot, counter) in counters.iter_mut().zip(StatusCounter::ALL) {
            *slot = self.status_counter(counter).await?;
        }

        Ok(counters)
    }

    pub async fn link_status(&mut self) -> Result<LinkStatusRegister, Error> {
        self.window.read_register::<LinkStatusRegister>().await
    }

    pub async fn rx_link_up(&mut self) -> Result<bool, Error> {
        Ok(self.link_status().await?.rx_link_up())
    }

    pub async fn cpll_locked(&mut self) -> Result<bool, Error> {
        Ok(self.link_status().await?.cpll_lock())
    }

    pub async fn packet_rate(&mut self) -> Result<u32, Error> {
        Ok(self.window.read_register::<PacketRateRegister>().await?.hz())
    }

    pub async fn sof_rate(&mut self) -> Result<u32, Error> {
        Ok(self.window.read_register::<SofRateRegister>().await?.hz())
    }

    pub async fn user_value(&mut self) -> Result<u128, Error> {
        Ok(self.window.read_register::<UserValueRegister>().await?.value())
    }

    /* GTH control */

    pub async fn rx_polarity_inverted(&mut self) -> Result<bool, Error> {
        Ok(self.window.read_register::<RxPolarityRegister>().await?.inverted())
    }

    pub async fn set_rx_polarity_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.window
            .modify_register(|mut reg: RxPolarityRegister| {
                reg.set_inverted(inverted);
                reg
            })
            .await
    }

    pub async fn tx_polarity_inverted(&mut self) -> Result<bool, Error> {
        Ok(self.window.read_register::<TxPolarityRegister>().await?.inverted())
    }

    pub async fn set_tx_polarity_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.window
            .modify_register(|mut reg: TxPolarityRegister| {
                reg.set_inverted(inverted);
                reg
            })
            .await
    }

    pub async fn loopback(&mut self) -> Result<bool, Error> {
        Ok(self.window.read_register::<LoopbackRegister>().await?.enabled())
    }

    pub async fn set_loopback(&mut self, enabled: bool) -> Result<(), Error> {
        self.window
            .modify_register(|mut reg: LoopbackRegister| {
                reg.set_enabled(enabled);
                reg
            })
            .await
    }

    pub async fn roll_over_mask(&mut self) -> Result<u10, Error> {
        Ok(self
            .window
            .read_register::<RollOverEnableRegister>()
            .await?
            .mask())
    }

    pub async fn set_roll_over_mask(&mut self, mask: u10) -> Result<(), Error> {
        self.window
            .modify_register(|mut reg: RollOverEnableRegister| {
                reg.set_mask(mask);
                reg
            })
            .await
    }

    pub async fn set_counter_roll_over(
        &mut self,
        counter: StatusCounter,
        enabled: bool,
    ) -> Result<(), Error> {
        self.window
            .modify_register(|mut reg: RollOverEnableRegister| {
                reg.set_counter_enabled(counter, enabled);
                reg
            })
            .await
    }

    /* Commands */

    /// Resets all the status counters
    pub async fn reset_counters(&mut self) -> Result<(), Error> {
        let mut reg = CounterResetRegister::from(0u32);
        reg.trigger();

        self.window.write_register(reg).await
    }

    /// Resets the GTH transceiver
    pub async fn reset_gt(&mut self) -> Result<(), Error> {
        let mut reg = GtResetRegister::from(0u32);
        reg.trigger();

        self.window.write_register(reg).await
    }

    /// Returns every register of the core to its default value
    pub async fn hard_reset(&mut self) -> Result<(), Error> {
        let mut reg = HardResetRegister::from(0u32);
        reg.trigger();

        self.window.write_register(reg).await
    }

    pub async fn run_command(&mut self, command: RxCoreCommand) -> Result<(), Error> {
        log_info!("{} at {:#x}", command.name(), self.window.base());

        match command {
            RxCoreCommand::RstCnt => self.reset_counters().await,
            RxCoreCommand::RstGt => self.reset_gt().await,
            RxCoreCommand::RstHard => self.hard_reset().await,
        }
    }

    /// Resets the GTH and polls `RxLinkUp` once per millisecond until the
    /// link recovers. Gives up after [`LINK_UP_ATTEMPTS`] checks.
    pub async fn reset_gt_and_wait_for_link(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), Error> {
        self.reset_gt().await?;

        for _ in 0..LINK_UP_ATTEMPTS {
            delay.delay_ms(1).await;

            if self.rx_link_up().await? {
                return Ok(());
            }
        }

        log_warn!("link at {:#x} still down after GTH reset", self.window.base());

        Err(Error::LinkTimeout)
    }

    /* BSA / MPS */

    pub async fn bsa_quantity(&mut self, channel: RxBsaChannel) -> Result<u32, Error> {
        let reg = self
            .window
            .read_repeated_register::<BsaQuantityRegister>(channel)
            .await?;

        Ok(reg.value())
    }

    pub async fn bsa_severity(&mut self, channel: RxBsaChannel) -> Result<Severity, Error> {
        let reg = self
            .window
            .read_repeated_register::<BsaSeverityRegister>(channel)
            .await?;

        Ok(reg.severity())
    }

    pub async fn mps_permit(&mut self) -> Result<u8, Error> {
        Ok(self.window.read_register::<MpsPermitRegister>().await?.permit())
    }

    pub async fn remote_timestamp(&mut self) -> Result<u64, Error> {
        Ok(self
            .window
            .read_register::<RemoteTimestampRegister>()
            .await?
            .value())
    }

    /// Reads every polled field of the core
    pub async fn read_status(&mut self) -> Result<RxCoreStatus, Error> {
        let mut status = RxCoreStatus {
            counters: self.status_counters().await?,
            ..Default::default()
        };

        let link = self.link_status().await?;
        status.rx_link_up = link.rx_link_up();
        status.cpll_lock = link.cpll_lock();

        status.packet_rate_hz = self.packet_rate().await?;
        status.sof_rate_hz = self.sof_rate().await?;
        status.user_value = self.user_value().await?;

        for (i, channel) in RxBsaChannel::ALL.into_iter().enumerate() {
            status.bsa_quantity[i] = self.bsa_quantity(channel).await?;
            status.bsa_severity[i] = self.bsa_severity(channel).await?;
        }

        status.mps_permit = self.mps_permit().await?;
        status.remote_timestamp = self.remote_timestamp().await?;

        Ok(status)
    }
}
