use super::parsing::{
    env_optional, env_or_default, is_supported_paper_extension, parse_bool, parse_cors_origins,
    parse_environment, parse_f64, parse_string_list, parse_u32, parse_u64,
};
use super::types::{
    AiSettings, ApiSettings, BatchSettings, ConfigError, CorsSettings, ExtractSettings,
    RuntimeSettings, ServerHost, ServerPort, ServerSettings, Settings, TelemetrySettings,
    UploadSettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("EXAMPREP_HOST", "0.0.0.0");
        let port = env_or_default("EXAMPREP_PORT", "8000");

        let environment =
            parse_environment(env_optional("EXAMPREP_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("EXAMPREP_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "ExamPrep Engine");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let openai_api_key = env_or_default("OPENAI_API_KEY", "");
        let openai_base_url = env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1");
        let ai_model = env_or_default("AI_MODEL", "gpt-4o-mini");
        let ai_max_tokens = parse_u32("AI_MAX_TOKENS", env_or_default("AI_MAX_TOKENS", "4000"))?;
        let ai_temperature =
            parse_f64("AI_TEMPERATURE", env_or_default("AI_TEMPERATURE", "0.7"))?;
        let ai_request_timeout =
            parse_u64("AI_REQUEST_TIMEOUT", env_or_default("AI_REQUEST_TIMEOUT", "120"))?;

        let extract_api_key = env_or_default("EXTRACT_API_KEY", "");
        let extract_base_url =
            env_or_default("EXTRACT_BASE_URL", "https://www.datalab.to/api/v1");
        let extract_output_format =
            env_or_default("EXTRACT_OUTPUT_FORMAT", "markdown").to_ascii_lowercase();
        let extract_timeout_seconds =
            parse_u64("EXTRACT_TIMEOUT_SECONDS", env_or_default("EXTRACT_TIMEOUT_SECONDS", "120"))?;
        let extract_poll_interval_seconds = parse_u64(
            "EXTRACT_POLL_INTERVAL_SECONDS",
            env_or_default("EXTRACT_POLL_INTERVAL_SECONDS", "2"),
        )?;
        let extract_max_poll_attempts = parse_u32(
            "EXTRACT_MAX_POLL_ATTEMPTS",
            env_or_default("EXTRACT_MAX_POLL_ATTEMPTS", "60"),
        )?;

        let max_upload_size_mb =
            parse_u64("MAX_UPLOAD_SIZE_MB", env_or_default("MAX_UPLOAD_SIZE_MB", "10"))?;
        let allowed_paper_extensions =
            parse_string_list(env_optional("ALLOWED_PAPER_EXTENSIONS"), &["pdf", "txt", "csv"]);

        let max_files_per_batch =
            parse_u64("MAX_FILES_PER_BATCH", env_or_default("MAX_FILES_PER_BATCH", "10"))?;
        let max_questions_per_batch = parse_u64(
            "MAX_QUESTIONS_PER_BATCH",
            env_or_default("MAX_QUESTIONS_PER_BATCH", "100"),
        )?;

        let log_level = env_or_default("EXAMPREP_LOG_LEVEL", "info");
        let json = env_optional("EXAMPREP_LOG_JSON")
            .map(|value| parse_bool(&value))
            .unwrap_or(false);
        let prometheus_enabled = env_optional("PROMETHEUS_ENABLED")
            .map(|value| parse_bool(&value))
            .unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            cors: CorsSettings { origins: cors_origins },
            ai: AiSettings {
                openai_api_key,
                openai_base_url,
                ai_model,
                ai_max_tokens,
                ai_temperature,
                ai_request_timeout,
            },
            extract: ExtractSettings {
                api_key: extract_api_key,
                base_url: extract_base_url,
                output_format: extract_output_format,
                timeout_seconds: extract_timeout_seconds,
                poll_interval_seconds: extract_poll_interval_seconds,
                max_poll_attempts: extract_max_poll_attempts,
            },
            upload: UploadSettings { max_upload_size_mb, allowed_paper_extensions },
            batch: BatchSettings { max_files_per_batch, max_questions_per_batch },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn ai(&self) -> &AiSettings {
        &self.ai
    }

    pub(crate) fn extract(&self) -> &ExtractSettings {
        &self.extract
    }

    pub(crate) fn upload(&self) -> &UploadSettings {
        &self.upload
    }

    pub(crate) fn batch(&self) -> &BatchSettings {
        &self.batch
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.allowed_paper_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ALLOWED_PAPER_EXTENSIONS",
                value: String::from("<empty>"),
            });
        }

        for extension in &self.upload.allowed_paper_extensions {
            if !is_supported_paper_extension(extension) {
                return Err(ConfigError::InvalidValue {
                    field: "ALLOWED_PAPER_EXTENSIONS",
                    value: extension.clone(),
                });
            }
        }

        if self.extract.poll_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "EXTRACT_POLL_INTERVAL_SECONDS",
                value: "0".to_string(),
            });
        }

        if self.extract.max_poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "EXTRACT_MAX_POLL_ATTEMPTS",
                value: "0".to_string(),
            });
        }

        if self.batch.max_files_per_batch == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_FILES_PER_BATCH",
                value: "0".to_string(),
            });
        }

        if self.batch.max_questions_per_batch == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_QUESTIONS_PER_BATCH",
                value: "0".to_string(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.ai.openai_api_key.is_empty() {
            return Err(ConfigError::MissingSecret("OPENAI_API_KEY"));
        }
        if self.ai.openai_base_url.is_empty() {
            return Err(ConfigError::MissingSecret("OPENAI_BASE_URL"));
        }
        if self.extract.api_key.is_empty() {
            return Err(ConfigError::MissingSecret("EXTRACT_API_KEY"));
        }
        if self.extract.base_url.is_empty() {
            return Err(ConfigError::MissingSecret("EXTRACT_BASE_URL"));
        }

        Ok(())
    }
}
