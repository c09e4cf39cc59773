//! 기동 과정의 터미널 출력 헬퍼
//!
//! 서비스 레지스트리 초기화와 기동 작업(인덱스 생성, 관리자 계정 확인)을
//! 박스/트리 형태로 출력합니다. 로그 레벨과 무관하게 항상 표준 출력으로 나갑니다.

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 서버 바인딩 직전에 접속 정보를 출력합니다.
pub fn print_server_banner(host: &str, port: u16, frontend_url: &str) {
    print_boxed_title("🌦️  GDASH BACKEND");
    println!("   🌐 API:      http://{}:{}/api", host, port);
    println!("   ❤️  Health:   http://{}:{}/health", host, port);
    println!("   🖥️  Frontend: {}", frontend_url);
    println!();
}
