//! Use case for regenerating the explicit instantiation block of a target

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::application::{
    ApplicationError, GenerateRequest, PipelineReport, SourceStore, TargetStatus, WriteMode,
};
use crate::emission::InstantiationEmitter;
use crate::resolution::resolve_instantiations;
use crate::scanning::{ConstantCollector, UsageScanner, scan_definitions, scan_usage_source};

/// Runs declarations -> usages -> target pipelines against a [`SourceStore`]
pub struct InstantiationPipeline {
    store: Arc<dyn SourceStore>,
}

impl InstantiationPipeline {
    pub fn new(store: Arc<dyn SourceStore>) -> Self {
        Self { store }
    }

    /// Run one pipeline.
    ///
    /// Every input is read and resolved before the target is touched, so a
    /// failing run leaves the target exactly as it was.
    pub async fn execute(
        &self,
        request: GenerateRequest,
    ) -> Result<PipelineReport, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        info!(
            declarations = %request.declarations.display(),
            target = %request.target.display(),
            "Generating template instantiations"
        );

        // 2. Extract template class signatures
        let declarations = self.store.read_text(&request.declarations).await?;
        let signatures = scan_definitions(&declarations);
        if signatures.is_empty() {
            warn!(
                declarations = %request.declarations.display(),
                "No template classes declared"
            );
        }

        // 3. Collect constants and raw instantiation sites from every usage file
        let scanner = UsageScanner::new(&signatures);
        let mut collector = ConstantCollector::new();
        let mut raw = Vec::new();
        for usage in &request.usages {
            let content = self.store.read_text(usage).await?;
            let sites = scan_usage_source(usage, &content, &scanner, &mut collector)?;
            debug!(usage = %usage.display(), sites = sites.len(), "Scanned usage file");
            raw.extend(sites);
        }
        let constants = collector.into_table();

        // 4. Resolve constants, fold arithmetic, deduplicate
        let instantiations = resolve_instantiations(&raw, &constants)?;

        // 5. Splice the regenerated block into the target
        let existing = self.store.read_text(&request.target).await?;
        let emitter = InstantiationEmitter::new(request.marker.as_str());
        let content = emitter.emit(&existing, &instantiations);

        // 6. Write, check or preview
        let status = if content == existing {
            TargetStatus::Unchanged
        } else {
            match request.mode {
                WriteMode::Write => {
                    self.store.write_text(&request.target, &content).await?;
                    TargetStatus::Updated
                }
                WriteMode::Check => {
                    return Err(ApplicationError::OutOfDate(request.target));
                }
                WriteMode::DryRun => TargetStatus::OutOfDate,
            }
        };

        info!(
            target = %request.target.display(),
            instantiations = instantiations.len(),
            status = ?status,
            "Template instantiations generated"
        );

        Ok(PipelineReport {
            target: request.target,
            signatures: signatures.len(),
            constants: constants.len(),
            occurrences: raw.len(),
            declarations: instantiations.declarations(),
            status,
        })
    }

    /// Run independent pipelines concurrently.
    ///
    /// A failing pipeline does not affect the others; results are returned in
    /// request order.
    pub async fn execute_all(
        &self,
        requests: Vec<GenerateRequest>,
    ) -> Vec<Result<PipelineReport, ApplicationError>> {
        let runs = requests.into_iter().map(|request| {
            let target = request.target.clone();
            async move {
                let result = self.execute(request).await;
                if let Err(e) = &result {
                    error!(target = %target.display(), error = %e, "Pipeline failed");
                }
                result
            }
        });
        join_all(runs).await
    }
}
