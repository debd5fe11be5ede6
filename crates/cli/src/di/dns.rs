use ferrous_resolve_application::DnsClient;
use ferrous_resolve_domain::Config;
use ferrous_resolve_infrastructure::dns::create_resolver;
use tracing::info;

pub struct DnsServices {
    pub client: DnsClient,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver_config = &config.resolver;
        let server = resolver_config.server_addr()?;
        let resolver = create_resolver(resolver_config);

        info!(
            server = %server,
            protocol = resolver.protocol_name(),
            timeout_ms = resolver_config.timeout_ms,
            tcp_fallback = resolver_config.tcp_fallback,
            "Resolver ready"
        );

        let client = DnsClient::new(server, resolver)
            .with_recursion_desired(resolver_config.recursion_desired);

        Ok(Self { client })
    }
}
