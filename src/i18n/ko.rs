use super::Strings;

pub(crate) static STRINGS: Strings = Strings {
    create_success: "Relay Admin 인스턴스를 생성했습니다.",
    create_start_hint: "'{command}' 명령으로 시작할 수 있습니다.",
    create_ok: "OK",
    summary_config_path: "- 설정 파일: {value}",
    summary_site_id: "- 사이트 ID: {value}",
    summary_admin_user: "- 관리자 계정: {value}",
    summary_admin_password: "- 관리자 비밀번호: {value}",
    summary_admin_created: "- 관리자 계정 상태: 생성됨",
    summary_admin_existing: "- 관리자 계정 상태: 이미 존재함, 비밀번호 갱신됨",
    prompt_odb_password: "ODB 비밀번호",
    prompt_tech_account_password: "기술 계정 비밀번호",
    error_resolve_path_failed: "경로를 확인할 수 없습니다: {value}",
    error_target_not_dir: "대상이 디렉터리가 아닙니다: {value}",
    error_target_not_empty: "대상 디렉터리가 비어 있지 않습니다: {value}",
    error_key_material_unreadable: "키 파일을 읽을 수 없습니다: {value}",
    error_create_dir_failed: "디렉터리를 생성하지 못했습니다: {value}",
    error_copy_file_failed: "키 파일을 설치하지 못했습니다: {value}",
    error_read_file_failed: "파일을 읽지 못했습니다: {value}",
    error_write_file_failed: "파일을 쓰지 못했습니다: {value}",
    error_encrypt_failed: "{value} 암호화에 실패했습니다",
    error_serialize_config_failed: "관리자 설정을 직렬화하지 못했습니다",
    error_load_settings_failed: "설정을 불러오지 못했습니다: {value}",
    error_open_store_failed: "{value} 데이터베이스를 열지 못했습니다",
    error_sync_schema_failed: "데이터베이스 스키마를 동기화하지 못했습니다",
    error_load_fixture_failed: "초기 데이터를 불러오지 못했습니다: {value}",
    error_create_superuser_failed: "관리자 계정을 생성하지 못했습니다",
    error_admin_lookup_failed: "사용자를 조회하지 못했습니다: {value}",
    error_set_password_failed: "관리자 비밀번호를 설정하지 못했습니다",
    error_existing_user_not_superuser: "사용자 '{value}'가 이미 있지만 관리자 권한이 없어 비밀번호를 재설정하지 않습니다",
    error_prompt_write_failed: "프롬프트를 출력하지 못했습니다",
    error_prompt_flush_failed: "프롬프트 출력을 비우지 못했습니다",
    error_prompt_read_failed: "입력을 읽지 못했습니다",
};
