use crate::logging::log_info;
use crate::memory::combine::{
    BsaDataRegister, CombineCommand, CombineCounterResetRegister, CombinedBsaChannel,
    CombinedSeverityRegister, LaneTimestampRegister, LocalTimestampRegister,
    RemoteDropCountRegister, UpdateRateRegister, COMBINED_BSA_CHANNEL_COUNT,
};
use crate::memory::{Lane, Severity, RX_CORE_COUNT};
use crate::transport::MemoryBus;
use crate::window::{Error, RegisterWindow};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CombineStatus {
    pub bsa_data: [u32; COMBINED_BSA_CHANNEL_COUNT],
    pub bsa_severity: [Severity; COMBINED_BSA_CHANNEL_COUNT],
    /// Indexed by lane
    pub remote_drop_count: [u32; RX_CORE_COUNT],
    /// Indexed by lane
    pub remote_timestamp: [u64; RX_CORE_COUNT],
    pub local_timestamp: u64,
    pub packet_rate_hz: u32,
}

/// Handle on the `BsaMpsMsgRxCombine` block
pub struct RxCombine<'a, B> {
    window: RegisterWindow<'a, B>,
}

#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
impl<'a, B> RxCombine<'a, B>
where
    B: MemoryBus,
{
    pub fn new(bus: &'a mut B, base: u64) -> Self {
        Self {
            window: RegisterWindow::new(bus, base),
        }
    }

    pub fn window(&mut self) -> &mut RegisterWindow<'a, B> {
        &mut self.window
    }

    pub async fn bsa_data(&mut self, channel: CombinedBsaChannel) -> Result<u32, Error> {
        let reg = self
            .window
            .read_repeated_register::<BsaDataRegister>(channel)
            .await?;

        Ok(reg.value())
    }

    pub async fn bsa_severity(&mut self, channel: CombinedBsaChannel) -> Result<Severity, Error> {
        let reg = self
            .window
            .read_repeated_register::<CombinedSeverityRegister>(channel)
            .await?;

        Ok(reg.severity())
    }

    pub async fn remote_drop_count(&mut self, lane: Lane) -> Result<u32, Error> {
        let reg = self
            .window
            .read_repeated_register::<RemoteDropCountRegister>(lane)
            .await?;

        Ok(reg.count())
    }

    pub async fn remote_timestamp(&mut self, lane: Lane) -> Result<u64, Error> {
        let reg = self
            .window
            .read_repeated_register::<LaneTimestampRegister>(lane)
            .await?;

        Ok(reg.value())
    }

    pub async fn local_timestamp(&mut self) -> Result<u64, Error> {
        Ok(self
            .window
            .read_register::<LocalTimestampRegister>()
            .await?
            .value())
    }

    /// Diagnostic bus update rate
    pub async fn packet_rate(&mut self) -> Result<u32, Error> {
        Ok(self.window.read_register::<UpdateRateRegister>().await?.hz())
    }

    /// Resets all the status counters
    pub async fn reset_counters(&mut self) -> Result<(), Error> {
        let mut reg = CombineCounterResetRegister::from(0u32);
        reg.trigger();

        self.window.write_register(reg).await
    }

    pub async fn run_command(&mut self, command: CombineCommand) -> Result<(), Error> {
        log_info!("{} at {:#x}", command.name(), self.window.base());

        match command {
            CombineCommand::RstCnt => self.reset_counters().await,
        }
    }

    pub async fn read_status(&mut self) -> Result<CombineStatus, Error> {
        let mut status = CombineStatus::default();

        for channel in CombinedBsaChannel::all() {
            let i = u8::from(channel) as usize;
            status.bsa_data[i] = self.bsa_data(channel).await?;
            status.bsa_severity[i] = self.bsa_severity(channel).await?;
        }

        for lane in Lane::ALL {
            let i = u8::from(lane) as usize;
            status.remote_drop_count[i] = self.remote_drop_count(lane).await?;
            status.remote_timestamp[i] = self.remote_timestamp(lane).await?;
        }

        status.local_timestamp = self.local_timestamp().await?;
        status.packet_rate_hz = self.packet_rate().await?;

        Ok(status)
    }
}
