//! The library components that make up the SDK archive.
//!
//! Paths are relative to `<open-sdk>/src`. Small, stable file sets are listed
//! explicitly; large or churn-prone trees are picked up by pattern. A
//! component may carry both.

use super::Component;

pub const COMPONENTS: &[Component] = &[
    Component {
        name: "common",
        files: &[],
        patterns: &["common/utilities/*.c", "common/backoffAlgorithm/source/*.c"],
        enabled: true,
    },
    Component {
        name: "json",
        files: &["libcjson/cJSON/cJSON.c"],
        patterns: &[],
        enabled: true,
    },
    Component {
        name: "http",
        files: &[
            "libhttp/coreHTTP/source/core_http_client.c",
            "libhttp/coreHTTP/source/dependency/3rdparty/http_parser/http_parser.c",
            "libhttp/src/http_client_wrapper.c",
            "libhttp/src/http_download.c",
        ],
        patterns: &[],
        enabled: true,
    },
    Component {
        name: "lwip",
        files: &["liblwip/lwip-2.1.2/src/netif/ethernet.c"],
        patterns: &[
            "liblwip/lwip-2.1.2/src/core/*.c",
            "liblwip/lwip-2.1.2/src/core/ipv4/*.c",
            "liblwip/lwip-2.1.2/src/core/ipv6/*.c",
            "liblwip/lwip-2.1.2/src/api/*.c",
            "liblwip/port/*.c",
        ],
        enabled: true,
    },
    Component {
        name: "mqtt",
        files: &[],
        patterns: &["libmqtt/coreMQTT/source/*.c", "libmqtt/src/*.c"],
        enabled: true,
    },
    Component {
        name: "tls",
        files: &[],
        patterns: &["libtls/mbedtls-3.1.0/library/*.c", "libtls/src/*.c"],
        enabled: true,
    },
    Component {
        name: "bluetooth",
        files: &[],
        patterns: &[
            "tal_bluetooth/src/*.c",
            "tal_bluetooth/nimble/*.c",
            "tal_bluetooth/nimble/host/*.c",
            "tal_bluetooth/nimble/modules/*.c",
        ],
        enabled: true,
    },
    Component {
        name: "cli",
        files: &[],
        patterns: &["tal_cli/src/*.c"],
        enabled: true,
    },
    Component {
        name: "driver",
        files: &[],
        patterns: &["tal_driver/src/*.c"],
        enabled: true,
    },
    Component {
        name: "kv",
        files: &[
            "tal_kv/littlefs/lfs_util.c",
            "tal_kv/littlefs/lfs.c",
            "tal_kv/src/tal_kv.c",
            "tal_kv/src/kv_serialize.c",
        ],
        patterns: &[],
        enabled: true,
    },
    Component {
        name: "network",
        files: &["tal_network/src/tal_network.c"],
        patterns: &[],
        enabled: true,
    },
    Component {
        name: "security",
        files: &[],
        patterns: &["tal_security/src/*.c", "tal_security/src/mbedtls/*.c"],
        enabled: true,
    },
    Component {
        name: "system",
        files: &[],
        patterns: &["tal_system/src/*.c"],
        enabled: true,
    },
    Component {
        name: "wifi",
        files: &[],
        patterns: &["tal_wifi/src/*.c"],
        enabled: true,
    },
    // No buildable port yet.
    Component {
        name: "wired",
        files: &[],
        patterns: &[],
        enabled: false,
    },
    Component {
        name: "cloud",
        files: &["cloud_service/netmgr/netmgr.c", "cloud_service/netmgr/netconn_wifi.c"],
        patterns: &[
            "cloud_service/lan/*.c",
            "cloud_service/netcfg/*.c",
            "cloud_service/protocol/*.c",
            "cloud_service/schema/*.c",
            "cloud_service/cloud/*.c",
            "cloud_service/tls/*.c",
            "cloud_service/transport/*.c",
            "cloud_service/ble/*.c",
        ],
        enabled: true,
    },
];
