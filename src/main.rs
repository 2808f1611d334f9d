//! The `otc` server.
//!
//! Run with:
//!   otc -p 8282 --log-stdout
//!
//! Try:
//!   curl -X PUT --data-binary val_1 http://localhost:8282/data/photos
//!   curl http://localhost:8282/data/photos/<oid>
//!   curl -X DELETE http://localhost:8282/data/photos/<oid>
//!   curl -X PUT -d path=/a/b.txt -d content=hello http://localhost:8282/media/
//!   curl http://localhost:8282/media/a/b.txt

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use otc::config::{Cli, Config};
use otc::media::{FsContentStore, MediaLibrary, MemoryMetadataStore, StorageContext};
use otc::{DataController, MediaController, MethodMap, MountOptions, PathShape, Router, Server};

fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse());
    let _log_guard = otc::logging::init(&config.log)?;

    info!(workers = config.workers, storage = %config.storage_root.display(), "starting otc");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()?
        .block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let ctx = StorageContext::new(&config.storage_root);
    let library = MediaLibrary::new(
        Arc::new(FsContentStore::open(&ctx)?),
        Arc::new(MemoryMetadataStore::new()),
    );

    let app = Router::new()
        .mount_with(
            "/data/",
            MountOptions::new()
                .shape(PathShape::RepositoryFirst)
                .methods(MethodMap::WithoutEdit),
            Arc::new(DataController::new()),
        )
        .mount("/media/", Arc::new(MediaController::new(library)));

    Server::bind(config.addr).await?.serve(app).await?;
    Ok(())
}
