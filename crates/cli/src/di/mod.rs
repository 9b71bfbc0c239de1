use anyhow::Context;
use sift_dns_application::ports::{BlockClassifier, BlockListSource, StatsSource, SystemDns};
use sift_dns_domain::Config;
use sift_dns_infrastructure::dns::block_filter::{BlockList, BlockListLoader, GlobBlacklist};
use sift_dns_infrastructure::dns::cache::ResponseCache;
use sift_dns_infrastructure::dns::dispatcher::{QueryDispatcher, Upstream};
use sift_dns_infrastructure::dns::events::{OutcomeReporter, QueryCounters, QueryEventEmitter};
use sift_dns_infrastructure::dns::pipeline::QueryPipeline;
use sift_dns_infrastructure::dns::query_logger::QueryEventLogger;
use sift_dns_infrastructure::dns::server::{DnsServer, FatalFaultHandler};
use sift_dns_infrastructure::system::{NoopSystemDns, ResolvConf};
use sift_dns_jobs::{BlocklistSyncJob, StatsReportJob};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::level_filters::LevelFilter;

/// Buffered outcome events before the log consumer starts dropping them.
const QUERY_EVENT_CAPACITY: usize = 4096;

/// Everything the binary starts, wired from one `Config`.
pub struct DnsServices {
    pub server: Arc<DnsServer>,
    pub blocklist_sync: Option<Arc<BlocklistSyncJob>>,
    pub stats_report: StatsReportJob,
    pub system_dns: Arc<dyn SystemDns>,
    pub fatal: Arc<FatalFaultHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let counters = Arc::new(QueryCounters::new());
        let emitter = if LevelFilter::current() >= LevelFilter::DEBUG {
            let (emitter, rx) = QueryEventEmitter::new_enabled(QUERY_EVENT_CAPACITY);
            QueryEventLogger::start(rx);
            emitter
        } else {
            QueryEventEmitter::new_disabled()
        };
        let reporter = OutcomeReporter::new(Arc::clone(&counters), emitter);

        let endpoints = config.upstream_endpoints()?;
        let upstreams = Upstream::connect_all(endpoints).context("Failed to set up upstreams")?;
        for upstream in &upstreams {
            info!(upstream = %upstream.display(), protocol = upstream.transport().protocol_name(), "Upstream configured");
        }

        let block_list = Arc::new(BlockList::new());
        let (blacklist, blocklist_sync) = if config.blocking.enabled {
            let blacklist = GlobBlacklist::new(&config.blocking.blacklist)
                .context("Invalid blacklist pattern")?;
            let loader: Arc<dyn BlockListSource> =
                Arc::new(BlockListLoader::new(Arc::clone(&block_list)));
            let job = BlocklistSyncJob::new(loader, config.blocking.block_lists.clone())
                .with_interval(config.blocking.refresh_interval)
                .with_cancellation(shutdown.clone());
            (blacklist, Some(Arc::new(job)))
        } else {
            info!("Blocking disabled");
            (GlobBlacklist::empty(), None)
        };

        let timeout = Duration::from_millis(config.dns.query_timeout);
        let classifier: Arc<dyn BlockClassifier> = block_list;
        let pipeline = QueryPipeline::new(
            Arc::new(ResponseCache::new(
                config.dns.cache_max_entries,
                config.dns.cache_min_ttl,
            )),
            classifier,
            Arc::new(blacklist),
            QueryDispatcher::new(timeout, reporter.clone()),
            upstreams,
            reporter,
        );

        let system_dns: Arc<dyn SystemDns> = if config.server.manage_system_dns {
            Arc::new(ResolvConf::new())
        } else {
            Arc::new(NoopSystemDns)
        };
        let fatal = Arc::new(FatalFaultHandler::new(Arc::clone(&system_dns)));

        let stats_source: Arc<dyn StatsSource> = counters;
        let stats_report = StatsReportJob::new(stats_source)
            .with_interval(config.stats.report_interval)
            .with_cancellation(shutdown);

        Ok(Self {
            server: Arc::new(DnsServer::new(Arc::new(pipeline), Arc::clone(&fatal))),
            blocklist_sync,
            stats_report,
            system_dns,
            fatal,
        })
    }
}
