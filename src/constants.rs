/// Labels and fixed values shared by the controller, the templates and the CLI.
/// Filter values travel through the page as plain strings, so these are the
/// canonical spellings.

// Filter values (used in the province list and in `ProvinceSelected` events)
pub const ALL_FILTER: &str = "all";
pub const OTHER_FILTER: &str = "其他";

// Display labels
pub const ALL_LABEL: &str = "全部";
pub const OTHER_LABEL: &str = OTHER_FILTER;

// Informational empty states
pub const NO_SEARCH_MATCH: &str = "未找到匹配";
pub const EMPTY_PROVINCE: &str = "该省份暂无社团数据";
pub const LOAD_FAILED_ALERT: &str = "数据加载失败，请检查 data/clubs.json 文件是否存在";

/// Queries shorter than this (in characters, after trimming) clear the results.
pub const MIN_QUERY_CHARS: usize = 2;

// Map defaults
pub const DEFAULT_CENTER: (f64, f64) = (35.8617, 104.1954);
pub const DEFAULT_ZOOM: u8 = 5;
pub const LOCATE_ZOOM: u8 = 13;
pub const MAX_CLUSTER_RADIUS: u32 = 50;
pub const DISABLE_CLUSTERING_AT_ZOOM: u8 = 6;
pub const DEFAULT_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
pub const DEFAULT_ATTRIBUTION: &str = "Tiles &copy; Esri";
pub const PLACEHOLDER_LOGO: &str = "assets/logos/placeholder.png";

// Marker icon geometry, in pixels
pub const ICON_SIZE: (u32, u32) = (60, 60);
pub const ICON_ANCHOR: (i32, i32) = (30, 60);
pub const POPUP_ANCHOR: (i32, i32) = (0, -60);

// Data and server defaults
pub const DEFAULT_DATA_SOURCE: &str = "data/clubs.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Request header carrying the page's session id on every event.
pub const SESSION_HEADER: &str = "x-club-map-session";
/// Sessions idle this long are dropped when the next page is opened.
pub const SESSION_IDLE_SECS: u64 = 2 * 60 * 60;

/// Province-level divisions counted as domestic. Anything else, including an
/// absent province, falls into the catch-all bucket.
pub const DOMESTIC_PROVINCES: [&str; 34] = [
    "北京市", "天津市", "上海市", "重庆市",
    "河北省", "山西省", "辽宁省", "吉林省", "黑龙江省",
    "江苏省", "浙江省", "安徽省", "福建省", "江西省", "山东省",
    "河南省", "湖北省", "湖南省", "广东省", "海南省",
    "四川省", "贵州省", "云南省", "陕西省", "甘肃省",
    "青海省", "台湾省", "内蒙古自治区", "广西壮族自治区", "西藏自治区",
    "宁夏回族自治区", "新疆维吾尔自治区", "香港特别行政区", "澳门特别行政区",
];
