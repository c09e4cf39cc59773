//! # Service Registry & Dependency Injection
//!
//! `singleton_macro`의 `#[service]`, `#[repository]` 매크로가 생성한 등록 정보를
//! `inventory`로 수집하고, 타입 기반으로 싱글톤 인스턴스를 해결하는 레지스트리입니다.
//! Spring의 `ApplicationContext` + `BeanFactory` 역할을 합니다.
//!
//! ## 해결 규칙
//!
//! `ServiceLocator::get::<T>()`는 타입 이름의 마지막 경로 세그먼트를 보고
//! 등록 이름을 찾습니다.
//!
//! | 타입 | 조회 키 | 매크로 선언 |
//! |------|---------|-------------|
//! | `UserRepository` | `user` | `#[repository(name = "user", ...)]` |
//! | `WeatherLogRepository` | `weatherlog` | `#[repository(name = "weatherlog", ...)]` |
//! | `AuthService` | `auth` | `#[service(name = "auth")]` |
//! | `GoogleAuthService` | `googleauth` | `#[service(name = "googleauth")]` |
//!
//! 매크로 등록이 없는 인프라 타입(`Database`, `RedisClient`)은
//! [`ServiceLocator::set`]으로 먼저 등록해야 합니다.
//!
//! ## 초기화 순서
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis);
//! ServiceLocator::initialize_all().await?;
//! ```
//!
//! 인스턴스 생성 중에는 레지스트리 락을 잡지 않으므로, 생성자가 다른 의존성을
//! 재귀적으로 요청해도 교착 상태가 발생하지 않습니다. 순환 의존은
//! 생성 중 집합으로 감지하여 즉시 패닉합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// `#[service]` 매크로가 자동 구현하는 서비스 trait
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[repository]` 매크로가 자동 구현하는 리포지토리 trait
///
/// 캐시 키 헬퍼(`cache_key`)가 `name()`을 사용하므로,
/// 캐시를 쓰는 리포지토리 모듈은 이 trait을 import 해야 합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|r| (registration_key(r.name), r.constructor))
        .collect();
    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|r| (registration_key(r.name), r.constructor))
        .collect();
    print_cache_initialized("Repository", cache.len());
    cache
});

/// `"weatherlog_repository"` → `"weatherlog"`
fn registration_key(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `"gdash_backend::services::auth::AuthService"` → `"AuthService"`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 타입 이름을 (종류, 조회 키)로 변환합니다. `WeatherLogRepository` → `("repository", "weatherlog")`
fn lookup_key(short_name: &str) -> Option<(&'static str, String)> {
    if let Some(prefix) = short_name.strip_suffix("Repository") {
        return Some(("repository", prefix.to_lowercase()));
    }
    short_name
        .strip_suffix("Service")
        .map(|prefix| ("service", prefix.to_lowercase()))
}

/// 생성 중 표시를 스코프 종료(패닉 포함) 시 해제합니다.
struct InitializingGuard(TypeId);

impl Drop for InitializingGuard {
    fn drop(&mut self) {
        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.0);
    }
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입 `T`의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 매크로가 생성한 생성자에서 호출되므로 `Result`가 아닌 인스턴스를 반환하며,
    /// 해결할 수 없는 경우(미등록, 순환 의존) 기동 단계에서 패닉합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        let newly_marked = LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id);
        if !newly_marked {
            eprintln!("❌ Circular dependency detected for type: {}", type_name);
            panic!("Circular dependency detected: {} is already being initialized", type_name);
        }
        let _guard = InitializingGuard(type_id);

        let short_name = short_type_name(type_name);
        let constructor = match lookup_key(short_name) {
            Some(("repository", key)) => REPOSITORY_NAME_CACHE.get(&key).copied(),
            Some((_, key)) => SERVICE_NAME_CACHE.get(&key).copied(),
            None => None,
        };

        let Some(constructor) = constructor else {
            panic!(
                "Service not found: {}. Register it with #[service]/#[repository] or ServiceLocator::set()",
                type_name
            );
        };

        let instance = match constructor().downcast::<Arc<T>>() {
            Ok(boxed) => *boxed,
            Err(_) => panic!("Type mismatch while resolving {}", type_name),
        };

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);

        instance
    }

    /// 이미 생성되었거나 수동 등록된 인스턴스만 조회합니다. 생성을 시도하지 않습니다.
    pub fn try_get<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        Self::cached::<T>(TypeId::of::<T>())
    }

    /// 매크로로 등록되지 않은 인프라 인스턴스를 수동 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        println!("📦 Registering: {}", short_type_name(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 생성한 뒤 서비스를 생성합니다. 각 생성자는
    /// 매크로의 `instance()`를 호출하므로 이후 `Xxx::instance()`는 같은 인스턴스를 반환합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        if !repositories.is_empty() {
            print_step_start(1, "Creating Repository instances");
            for registration in &repositories {
                (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(1, "Repository instances created", repositories.len());
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        if !services.is_empty() {
            print_step_start(2, "Creating Service instances");
            for registration in &services {
                (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }
            print_step_complete(2, "Service instances created", services.len());
        }

        print_final_summary(repositories.len(), services.len());

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
