// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

/// The embedded factory call as it appears in exported scripts.
pub const EMBEDDED_CALL: &str = "var dbConn = DatabaseConnectionFactory.createDatabaseConnection(\
'com.mysql.jdbc.Driver','jdbc:mysql://localhost:3306/mirthdb','mirth','mirthpass');";

/// Build a realistic channel export with a file-polling source, one filter,
/// one transformer, and one database-writer destination.
pub fn sample_channel_xml(name: &str) -> String {
    format!(
        "<channel version=\"1.8.2\">\
           <id>9c6d9546-bfba-4445-a6bb-f6e2869aaa42</id>\
           <name>{name}</name>\
           <description>integration test channel</description>\
           <enabled>true</enabled>\
           <sourceConnector>\
             <name>sourceConnector</name>\
             <properties>\
               <property name=\"DataType\">File Reader</property>\
               <property name=\"host\">/old/input</property>\
               <property name=\"pollingFrequency\">1000</property>\
               <property name=\"moveToDirectory\">/old/output</property>\
               <property name=\"moveToErrorDirectory\">/old/error</property>\
             </properties>\
             <filter>\
               <rules>\
                 <rule>\
                   <sequenceNumber>0</sequenceNumber>\
                   <data class=\"map\">\
                     <entry>\
                       <string>{call}</string>\
                     </entry>\
                   </data>\
                   <script>{call}</script>\
                 </rule>\
               </rules>\
             </filter>\
             <transformer>\
               <steps>\
                 <step>\
                   <sequenceNumber>0</sequenceNumber>\
                   <data class=\"map\">\
                     <entry><string>msg</string></entry>\
                   </data>\
                   <script>{call}</script>\
                 </step>\
               </steps>\
             </transformer>\
           </sourceConnector>\
           <destinationConnectors>\
             <connector>\
               <name>warehouse writer</name>\
               <properties>\
                 <property name=\"DataType\">Database Writer</property>\
                 <property name=\"URL\">jdbc:mysql://localhost:3306/mirthdb</property>\
                 <property name=\"username\">mirth</property>\
                 <property name=\"password\">mirthpass</property>\
                 <property name=\"host\">/old/output</property>\
                 <property name=\"script\">{call}</property>\
               </properties>\
             </connector>\
           </destinationConnectors>\
         </channel>",
        name = name,
        call = EMBEDDED_CALL,
    )
}

/// Create a unique scratch directory under the system temp dir.
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "channelforge_it_{}_{}",
        tag,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Populate a source directory with the full channel roster plus the
/// codetemplates file.
pub fn write_roster(source_dir: &PathBuf) {
    for name in channelforge::CHANNEL_ROSTER {
        std::fs::write(
            source_dir.join(format!("{name}.xml")),
            sample_channel_xml(name),
        )
        .unwrap();
    }
    std::fs::write(
        source_dir.join("codetemplates.xml"),
        "<list><codeTemplate/></list>",
    )
    .unwrap();
}
