use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use models::Product;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::codec;
use crate::storage::product_store::{apply_update, next_id, remove_by_id, ProductStore};

/// JSON file-backed product store.
///
/// Nothing is cached: each call reads the file, mutations rewrite it through
/// a sibling temp file and a rename so readers never observe a partial
/// snapshot. Mutations are serialised by `write_lock`, which is held across
/// the whole read-modify-write cycle.
pub struct JsonFileProductStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileProductStore {
    /// Open a store at `path`. The file itself is created lazily by the
    /// first mutation; its parent directory is created up front.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }
        Ok(Arc::new(Self { file_path, write_lock: Mutex::new(()) }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load(&self) -> Result<Vec<Product>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => codec::decode(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ServiceError::storage(e)),
        }
    }

    async fn save(&self, products: &[Product]) -> Result<(), ServiceError> {
        let data = codec::encode(products)?;
        let tmp = self.tmp_path();
        let written = self.write_snapshot(&tmp, &data).await;
        if written.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        written?;
        debug!(path = %self.file_path.display(), count = products.len(), "product snapshot written");
        Ok(())
    }

    async fn write_snapshot(&self, tmp: &Path, data: &[u8]) -> Result<(), ServiceError> {
        let mut file = fs::File::create(tmp).await.map_err(ServiceError::storage)?;
        file.write_all(data).await.map_err(ServiceError::storage)?;
        file.sync_all().await.map_err(ServiceError::storage)?;
        drop(file);
        fs::rename(tmp, &self.file_path).await.map_err(ServiceError::storage)
    }

    /// Sibling temp file, unique per write so stores sharing a path never
    /// interleave their partial snapshots.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "products.json".into());
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl ProductStore for JsonFileProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, ServiceError> {
        self.load().await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    async fn add(&self, mut product: Product) -> Result<Product, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        product.id = next_id(&products)?;
        products.push(product.clone());
        self.save(&products).await?;
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let updated = apply_update(&mut products, product);
        if updated.is_some() {
            self.save(&products).await?;
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load().await?;
        let existed = remove_by_id(&mut products, id);
        if existed {
            self.save(&products).await?;
        }
        Ok(existed)
    }
}
